use async_trait::async_trait;
use url::Url;

use super::{AuthError, ProviderProfile, ProviderToken, SessionData, SessionId};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Abstraction over the OAuth2 identity provider.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// URL the browser is sent to in order to start the login.
    fn authorization_url(&self) -> Url;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<ProviderToken>;

    /// Fetch the profile of the user owning `access_token`.
    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile>;

    /// Revoke the app linkage for the user owning `access_token`.
    async fn unlink(&self, access_token: &str) -> Result<()>;
}

/// Session storage abstraction.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load session data, `None` when the id is unknown.
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>>;

    /// Insert or replace session data.
    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<()>;

    /// Delete a session. Unknown ids are not an error.
    async fn delete(&self, id: &SessionId) -> Result<()>;
}
