//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kakaologin_core::storage::{
    RepositoryError, Result, UserRecord, UserRepository, BASELINE_LEVEL,
};

/// In-memory user storage for development and testing.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the rank of an existing user, as the external ranking job would.
    pub async fn set_level(&self, external_id: &str, level: impl Into<String>) {
        if let Some(user) = self.users.write().await.get_mut(external_id) {
            user.level = level.into();
        }
    }

    pub async fn get(&self, external_id: &str) -> Option<UserRecord> {
        self.users.read().await.get(external_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_external_id(&self, external_id: &str) -> Result<bool> {
        Ok(self.users.read().await.contains_key(external_id))
    }

    async fn insert(&self, external_id: &str, nickname: &str, image: Option<&str>) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(external_id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: external_id.to_string(),
            });
        }
        users.insert(
            external_id.to_string(),
            UserRecord::new(external_id, nickname, image.map(str::to_string)),
        );
        Ok(())
    }

    async fn delete(&self, external_id: &str) -> Result<()> {
        self.users.write().await.remove(external_id);
        Ok(())
    }

    async fn get_level(&self, external_id: &str) -> Result<String> {
        Ok(self
            .users
            .read()
            .await
            .get(external_id)
            .map(|user| user.level.clone())
            .unwrap_or_else(|| BASELINE_LEVEL.to_string()))
    }
}
