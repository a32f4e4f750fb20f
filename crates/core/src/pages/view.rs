use serde::Serialize;

use crate::auth::ProviderProfile;
use crate::storage::BASELINE_LEVEL;

/// Nickname shown to anonymous visitors.
pub const LOGIN_PLACEHOLDER: &str = "로그인 해주세요";

/// Appended to a logged-in user's nickname.
pub const HONORIFIC_SUFFIX: &str = "님";

/// Avatar shown when there is no profile thumbnail.
pub const DEFAULT_USER_IMAGE: &str = "img/profile-img.jpg";

/// The pages that share the session-driven header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    MyPage,
    Challenge,
}

impl Page {
    /// Route the page is served from.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::MyPage => "/mypage",
            Self::Challenge => "/challenge",
        }
    }
}

/// Values every page template receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub nickname: String,
    pub user_image: String,
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    pub ranking: String,
}

impl PageView {
    pub fn anonymous() -> Self {
        Self {
            nickname: LOGIN_PLACEHOLDER.to_string(),
            user_image: DEFAULT_USER_IMAGE.to_string(),
            logged_in: false,
            ranking: BASELINE_LEVEL.to_string(),
        }
    }

    pub fn authenticated(profile: &ProviderProfile, ranking: impl Into<String>) -> Self {
        Self {
            nickname: format!("{}{}", profile.nickname, HONORIFIC_SUFFIX),
            user_image: profile
                .thumbnail_image
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_IMAGE.to_string()),
            logged_in: true,
            ranking: ranking.into(),
        }
    }
}
