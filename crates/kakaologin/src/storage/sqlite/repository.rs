//! SQLite repository implementation.
//!
//! Implements `UserRepository` from `kakaologin_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use kakaologin_core::storage::{RepositoryError, Result, UserRepository, BASELINE_LEVEL};

use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based user repository.
///
/// One background connection; statements run one at a time.
pub struct SqliteUserRepository {
    conn: Connection,
}

impl SqliteUserRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn exists_by_external_id(&self, external_id: &str) -> Result<bool> {
        let id = external_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_EXISTS).map_err(wrap_err)?;
                stmt.exists([&id]).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, external_id))
    }

    async fn insert(&self, external_id: &str, nickname: &str, image: Option<&str>) -> Result<()> {
        let id = external_id.to_string();
        let nickname = nickname.to_string();
        let image = image.map(str::to_string);

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![id, nickname, image])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, external_id))?;

        tracing::debug!(external_id, "Inserted user");
        Ok(())
    }

    async fn delete(&self, external_id: &str) -> Result<()> {
        let id = external_id.to_string();

        let deleted = self
            .conn
            .call(move |conn| conn.execute(schema::DELETE_USER, [&id]).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, external_id))?;

        tracing::debug!(external_id, deleted, "Deleted user");
        Ok(())
    }

    async fn get_level(&self, external_id: &str) -> Result<String> {
        let id = external_id.to_string();

        let level = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_LEVEL).map_err(wrap_err)?;
                stmt.query_row([&id], |row| row.get::<_, String>(0))
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, external_id))?;

        Ok(level.unwrap_or_else(|| BASELINE_LEVEL.to_string()))
    }
}
