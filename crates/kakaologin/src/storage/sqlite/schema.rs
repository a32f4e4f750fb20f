//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users keyed by the provider's external id
CREATE TABLE IF NOT EXISTS users (
    external_id TEXT PRIMARY KEY,
    nickname TEXT NOT NULL,
    image TEXT,
    level TEXT NOT NULL DEFAULT 'Bronze'
);
"#;

pub const SELECT_USER_EXISTS: &str = "SELECT 1 FROM users WHERE external_id = ?1";

pub const INSERT_USER: &str = "INSERT INTO users (external_id, nickname, image) VALUES (?1, ?2, ?3)";

pub const DELETE_USER: &str = "DELETE FROM users WHERE external_id = ?1";

pub const SELECT_USER_LEVEL: &str = "SELECT level FROM users WHERE external_id = ?1";
