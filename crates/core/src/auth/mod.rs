mod error;
mod functions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{build_authorization_url, generate_session_id, DEFAULT_SCOPES};
pub use traits::{ProviderClient, Result, SessionRepository};
pub use types::{ProviderProfile, ProviderToken, SessionData, SessionId};
