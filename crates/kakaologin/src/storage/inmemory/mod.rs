//! In-memory storage backend.
//!
//! Stores users in a HashMap wrapped in `Arc<RwLock<_>>`. Used by tests and
//! by development runs where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use kakaologin::storage::inmemory::InMemoryUserRepository;
//!
//! let repo = InMemoryUserRepository::new();
//! repo.insert("42", "Kim", None).await?;
//! ```

mod repository;

pub use repository::InMemoryUserRepository;
