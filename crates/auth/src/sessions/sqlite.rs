//! SQLite session storage implementation.

use async_trait::async_trait;
use chrono::Utc;
use kakaologin_core::auth::{AuthError, Result, SessionData, SessionId, SessionRepository};
use sqlx::SqlitePool;

/// SQLite-backed session storage.
///
/// Session data is stored as a JSON document per session id.
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Creates a new SQLite session store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs database migrations to create required tables.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_sessions_updated_at ON sessions(updated_at);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let row = sqlx::query_as::<_, (String,)>("SELECT data FROM sessions WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        match row {
            Some((json,)) => {
                let data: SessionData =
                    serde_json::from_str(&json).map_err(|e| AuthError::Storage(e.to_string()))?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<()> {
        let json = serde_json::to_string(data).map_err(|e| AuthError::Storage(e.to_string()))?;

        sqlx::query("INSERT OR REPLACE INTO sessions (id, data, updated_at) VALUES (?, ?, ?)")
            .bind(id.as_str())
            .bind(json)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }
}
