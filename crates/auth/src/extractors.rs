//! Axum extractors for sessions.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use kakaologin_core::auth::SessionId;

use crate::error::AuthError;
use crate::session::Session;
use crate::AuthState;

/// Loads the session named by the session cookie.
///
/// Requests without a cookie, or with one the store does not know, get an
/// empty session. Only a storage failure rejects the request.
impl<S> FromRequestParts<S> for Session
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(&auth_state.config.cookie_name)
            .map(|cookie| SessionId::new(cookie.value().to_string()));

        Ok(Session::load(auth_state.sessions.clone(), session_id).await?)
    }
}
