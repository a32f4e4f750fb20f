//! Application state.
//!
//! Wraps the auth state, whose user repository the page handlers share.
//! Backends are selected at compile time via feature flags.

use std::sync::Arc;

use kakaologin_auth::{AuthConfig, AuthState};
use kakaologin_core::auth::SessionRepository;
use kakaologin_core::storage::UserRepository;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
}

impl AppState {
    /// Builds the state from the configured backends.
    pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
        let users = user_repository(config).await?;
        let sessions = session_store(config, &auth_config).await?;
        let auth = AuthState::new(sessions, users, auth_config)?;

        Ok(Self { auth })
    }

    /// Wraps an already assembled auth state.
    #[allow(dead_code)]
    pub fn from_auth(auth: AuthState) -> Self {
        Self { auth }
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        &self.auth.users
    }
}

/// Lets auth extractors (such as `Session`) pull `AuthState` out of `AppState`.
impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

#[cfg(feature = "sqlite")]
async fn user_repository(config: &Config) -> Result<Arc<dyn UserRepository>, anyhow::Error> {
    use crate::storage::SqliteUserRepository;

    tracing::info!(path = %config.sqlite_path, "Using SQLite user storage");
    Ok(Arc::new(SqliteUserRepository::new(&config.sqlite_path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn user_repository(_config: &Config) -> Result<Arc<dyn UserRepository>, anyhow::Error> {
    use crate::storage::InMemoryUserRepository;

    tracing::warn!("Using in-memory user storage, nothing will be persisted");
    Ok(Arc::new(InMemoryUserRepository::new()))
}

#[cfg(feature = "auth-redis")]
async fn session_store(
    config: &Config,
    auth_config: &AuthConfig,
) -> Result<Arc<dyn SessionRepository>, anyhow::Error> {
    use fred::prelude::*;
    use kakaologin_auth::RedisSessionStore;

    let redis_config = fred::prelude::Config::from_url(&config.redis_url)?;
    let pool = Builder::from_config(redis_config).build_pool(4)?;
    pool.init().await?;

    tracing::info!(url = %config.redis_url, "Using Redis session storage");
    Ok(Arc::new(RedisSessionStore::new(pool, auth_config.session_ttl)))
}

#[cfg(all(feature = "auth-sqlite", not(feature = "auth-redis")))]
async fn session_store(
    config: &Config,
    _auth_config: &AuthConfig,
) -> Result<Arc<dyn SessionRepository>, anyhow::Error> {
    use kakaologin_auth::SqliteSessionStore;

    let pool = sqlx::SqlitePool::connect(&config.session_sqlite_url).await?;
    let store = SqliteSessionStore::new(pool);
    store.migrate().await?;

    tracing::info!(url = %config.session_sqlite_url, "Using SQLite session storage");
    Ok(Arc::new(store))
}

#[cfg(not(any(feature = "auth-sqlite", feature = "auth-redis")))]
async fn session_store(
    _config: &Config,
    _auth_config: &AuthConfig,
) -> Result<Arc<dyn SessionRepository>, anyhow::Error> {
    use kakaologin_auth::InMemorySessionStore;

    tracing::warn!("Using in-memory session storage, sessions end on restart");
    Ok(Arc::new(InMemorySessionStore::new()))
}
