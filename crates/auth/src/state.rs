//! Application state for auth.

use axum::extract::FromRef;
use kakaologin_core::auth::{ProviderClient, SessionRepository};
use kakaologin_core::storage::UserRepository;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::providers::KakaoProvider;

/// Shared state for auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub provider: Arc<dyn ProviderClient>,
    pub config: AuthConfig,
}

impl AuthState {
    /// Creates a new AuthState talking to the Kakao endpoints in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider client cannot be built.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let provider = Arc::new(KakaoProvider::new(&config.kakao)?);
        Ok(Self::with_provider(sessions, users, provider, config))
    }

    /// Creates a new AuthState with an explicit provider client.
    pub fn with_provider(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        provider: Arc<dyn ProviderClient>,
        config: AuthConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            provider,
            config,
        }
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
