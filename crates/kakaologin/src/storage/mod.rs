//! Storage backend implementations.
//!
//! Concrete implementations of `kakaologin_core::storage::UserRepository`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite backend using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: HashMap backend, nothing is persisted
//!
//! When both are enabled, SQLite wins.
//!
//! Build with the in-memory backend:
//! ```bash
//! cargo build -p kakaologin --no-default-features --features inmemory,auth-mock
//! ```

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p kakaologin --features sqlite"
);

// Only the tests use it when SQLite is enabled
#[cfg_attr(feature = "sqlite", allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[allow(unused_imports)]
pub use inmemory::InMemoryUserRepository;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteUserRepository;
