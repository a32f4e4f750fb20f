//! Redis session storage implementation.

use async_trait::async_trait;
use fred::prelude::*;
use kakaologin_core::auth::{AuthError, Result, SessionData, SessionId, SessionRepository};
use std::time::Duration;

/// Redis-backed session storage.
///
/// Every write refreshes the key's TTL, so idle sessions expire on their own.
pub struct RedisSessionStore {
    pool: Pool,
    session_ttl: Duration,
}

impl RedisSessionStore {
    /// Creates a new Redis session store.
    ///
    /// # Arguments
    ///
    /// * `pool` - Redis connection pool
    /// * `session_ttl` - TTL for session data
    pub fn new(pool: Pool, session_ttl: Duration) -> Self {
        Self { pool, session_ttl }
    }

    fn session_key(id: &SessionId) -> String {
        format!("session:{}", id)
    }
}

#[async_trait]
impl SessionRepository for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let key = Self::session_key(id);
        let value: Option<String> = self
            .pool
            .get(&key)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        match value {
            Some(json) => {
                let data: SessionData =
                    serde_json::from_str(&json).map_err(|e| AuthError::Storage(e.to_string()))?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<()> {
        let key = Self::session_key(id);
        let value = serde_json::to_string(data).map_err(|e| AuthError::Storage(e.to_string()))?;

        let ttl_secs = self.session_ttl.as_secs() as i64;

        self.pool
            .set::<(), _, _>(&key, &value, Some(Expiration::EX(ttl_secs)), None, false)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<()> {
        let key = Self::session_key(id);
        self.pool
            .del::<(), _>(&key)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }
}
