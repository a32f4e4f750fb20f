//! Per-request view of a browser session.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use kakaologin_core::auth::{
    generate_session_id, ProviderProfile, ProviderToken, Result, SessionData, SessionId,
    SessionRepository,
};

use crate::config::AuthConfig;

/// Session state for the current request, backed by a [`SessionRepository`].
///
/// Every mutation is written through to the store. A session that has never
/// been written has no id; the first write mints one, and the handler that
/// performed it is responsible for sending the cookie.
pub struct Session {
    id: Option<SessionId>,
    data: SessionData,
    store: Arc<dyn SessionRepository>,
}

impl Session {
    /// Load the session named by `id`.
    ///
    /// An unknown id yields an empty session without an id, so a stale or
    /// forged cookie never gets adopted.
    pub async fn load(store: Arc<dyn SessionRepository>, id: Option<SessionId>) -> Result<Self> {
        let (id, data) = match id {
            Some(id) => match store.load(&id).await? {
                Some(data) => (Some(id), data),
                None => {
                    tracing::debug!(session_id = %id, "Unknown session id, starting fresh");
                    (None, SessionData::default())
                }
            },
            None => (None, SessionData::default()),
        };

        Ok(Self { id, data, store })
    }

    pub fn id(&self) -> Option<&SessionId> {
        self.id.as_ref()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn token(&self) -> Option<&ProviderToken> {
        self.data.token.as_ref()
    }

    pub fn profile(&self) -> Option<&ProviderProfile> {
        self.data.profile.as_ref()
    }

    pub async fn set_token(&mut self, token: ProviderToken) -> Result<()> {
        self.data.token = Some(token);
        self.persist().await
    }

    pub async fn set_profile(&mut self, profile: ProviderProfile) -> Result<()> {
        self.data.profile = Some(profile);
        self.persist().await
    }

    /// Drop the cached profile and keep the token.
    ///
    /// A session that was never stored stays unstored.
    pub async fn remove_profile(&mut self) -> Result<()> {
        self.data.profile = None;
        if self.id.is_none() {
            return Ok(());
        }
        self.persist().await
    }

    /// Delete the current record and start empty.
    ///
    /// The next write stores the data under a newly minted id.
    pub async fn rotate(&mut self) -> Result<()> {
        if let Some(id) = self.id.take() {
            self.store.delete(&id).await?;
        }
        self.data = SessionData::default();
        Ok(())
    }

    /// Delete the whole record from the store.
    pub async fn destroy(self) -> Result<()> {
        if let Some(id) = &self.id {
            self.store.delete(id).await?;
        }
        Ok(())
    }

    async fn persist(&mut self) -> Result<()> {
        let id = self.id.get_or_insert_with(generate_session_id);
        self.store.save(id, &self.data).await
    }
}

/// Cookie carrying the session id.
pub fn session_cookie(config: &AuthConfig, id: &SessionId) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), id.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(config.session_ttl.as_secs() as i64))
        .build()
}

/// Cookie that, passed to `CookieJar::remove`, expires the session cookie.
pub fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}
