use serde::{Deserialize, Serialize};

/// Rank assigned to new users and reported for unknown ones.
pub const BASELINE_LEVEL: &str = "Bronze";

/// Locally persisted user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub external_id: String,
    pub nickname: String,
    pub image: Option<String>,
    pub level: String,
}

impl UserRecord {
    /// A freshly signed-up user at the baseline level.
    pub fn new(
        external_id: impl Into<String>,
        nickname: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            nickname: nickname.into(),
            image,
            level: BASELINE_LEVEL.to_string(),
        }
    }
}
