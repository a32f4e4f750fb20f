//! SQLite storage backend implementation.
//!
//! Implements `UserRepository` using `rusqlite` for synchronous operations
//! and `tokio-rusqlite` for async wrapping.

mod error;
mod repository;
mod schema;

pub use repository::SqliteUserRepository;
