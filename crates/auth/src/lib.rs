//! Kakao OAuth2 login for kakaologin.
//!
//! This crate provides:
//! - The Kakao provider client (authorization URL, token exchange, profile, unlink)
//! - Session storage (in-memory, SQLite or Redis via feature flags)
//! - The `Session` extractor and the auth routes

mod config;
mod error;
mod extractors;
mod handlers;
mod providers;
mod session;
mod sessions;
mod state;

pub use config::{AuthConfig, KakaoConfig, KAKAO_API_URL, KAKAO_AUTH_URL};
pub use error::{AuthError, NOT_LOGGED_IN_MESSAGE, UNLINK_FAILED_MESSAGE};
pub use handlers::auth_routes;
pub use providers::KakaoProvider;
pub use session::{removal_cookie, session_cookie, Session};
pub use sessions::InMemorySessionStore;
#[cfg(feature = "redis")]
pub use sessions::RedisSessionStore;
#[cfg(feature = "sqlite")]
pub use sessions::SqliteSessionStore;
pub use state::AuthState;

#[cfg(any(test, feature = "mock"))]
pub mod mock_idp;
