use serde::{Deserialize, Serialize};

use crate::serde::deserialize_id_as_string;

/// Cryptographically random session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tokens granted by the provider's token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Profile fields cached in the session after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Provider-assigned external id.
    #[serde(deserialize_with = "deserialize_id_as_string")]
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
}

/// Per-browser session state.
///
/// Both fields start empty. The callback fills them in, logout drops only
/// the profile, and unlink destroys the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub token: Option<ProviderToken>,
    #[serde(default)]
    pub profile: Option<ProviderProfile>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.profile.is_none()
    }

    /// Whether the session carries a logged-in profile.
    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }
}
