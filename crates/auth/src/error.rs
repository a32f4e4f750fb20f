use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kakaologin_core::storage::RepositoryError;
use thiserror::Error;

/// Shown when an unlink request arrives without a logged-in session.
pub const NOT_LOGGED_IN_MESSAGE: &str = "로그인 되어있지 않습니다.";

/// Shown when the provider or the database fails during unlink.
pub const UNLINK_FAILED_MESSAGE: &str = "회원 탈퇴 처리 중 오류가 발생했습니다.";

/// Auth errors for the kakaologin_auth crate.
///
/// This wraps the core `AuthError` and adds the failures of the
/// multi-step handlers, each of which has its own response body.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (provider, session storage)
    #[error(transparent)]
    Core(#[from] kakaologin_core::auth::AuthError),

    /// User lookup or insert failed after a successful provider login
    #[error("signup failed: {0}")]
    Signup(#[source] RepositoryError),

    /// Provider unlink or local delete failed
    #[error("unlink failed: {0}")]
    Unlink(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        use kakaologin_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(CoreError::Provider { status, body }) => {
                tracing::error!(?status, %body, "Provider request failed");
                provider_payload_response(body)
            }
            AuthError::Core(CoreError::SessionMissing) => {
                (StatusCode::UNAUTHORIZED, NOT_LOGGED_IN_MESSAGE).into_response()
            }
            AuthError::Core(CoreError::Storage(ref e)) => {
                tracing::error!(error = %e, "Session storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
            AuthError::Signup(ref e) => {
                tracing::error!(error = %e, "Signup error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "success": false,
                        "message": "Internal Server Error",
                    })),
                )
                    .into_response()
            }
            AuthError::Unlink(ref e) => {
                tracing::error!(error = %e, "Unlink error");
                (StatusCode::INTERNAL_SERVER_ERROR, UNLINK_FAILED_MESSAGE).into_response()
            }
            AuthError::Config(ref e) => {
                tracing::error!(error = %e, "Config error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

/// Relay the provider's payload with a 500: as JSON when it parses, raw otherwise.
fn provider_payload_response(body: String) -> Response {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, body).into_response(),
    }
}
