use std::time::Duration;

use url::Url;

use crate::error::AuthError;

/// Production authorization server (authorize and token endpoints).
pub const KAKAO_AUTH_URL: &str = "https://kauth.kakao.com";

/// Production resource server (profile and unlink endpoints).
pub const KAKAO_API_URL: &str = "https://kapi.kakao.com";

/// Kakao application credentials and endpoints.
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: Url,
    pub auth_url: Url,
    pub api_url: Url,
}

impl KakaoConfig {
    /// Configuration pointing at the production Kakao endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, redirect_uri: Url) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri,
            auth_url: Url::parse(KAKAO_AUTH_URL).expect("KAKAO_AUTH_URL is a valid URL"),
            api_url: Url::parse(KAKAO_API_URL).expect("KAKAO_API_URL is a valid URL"),
        }
    }

    /// Point both the authorization and resource servers at `base`.
    ///
    /// Used to talk to the mock IdP during development and tests.
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.auth_url = base.clone();
        self.api_url = base;
        self
    }
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub kakao: KakaoConfig,
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_BASE_URL`: Public base URL the callback is derived from (default: `http://localhost:3000`)
    /// - `KAKAO_CLIENT_ID`: Kakao REST API key (required)
    /// - `KAKAO_CLIENT_SECRET`: Kakao client secret (required)
    /// - `KAKAO_REDIRECT_URI`: Registered callback URL (default: `{AUTH_BASE_URL}/callback`)
    /// - `KAKAO_AUTH_URL`: Authorization server (default: `https://kauth.kakao.com`)
    /// - `KAKAO_API_URL`: Resource server (default: `https://kapi.kakao.com`)
    /// - `SESSION_TTL_DAYS`: Session TTL in days (default: 7)
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if the client credentials are missing or a
    /// URL does not parse.
    pub fn from_env() -> Result<Self, AuthError> {
        let base_url = parse_url(
            "AUTH_BASE_URL",
            &std::env::var("AUTH_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )?;

        let client_id = required_var("KAKAO_CLIENT_ID")?;
        let client_secret = required_var("KAKAO_CLIENT_SECRET")?;

        let redirect_uri = match std::env::var("KAKAO_REDIRECT_URI") {
            Ok(uri) => parse_url("KAKAO_REDIRECT_URI", &uri)?,
            Err(_) => base_url
                .join("/callback")
                .map_err(|e| AuthError::Config(format!("AUTH_BASE_URL: {e}")))?,
        };

        let mut kakao = KakaoConfig::new(client_id, client_secret, redirect_uri);
        if let Ok(url) = std::env::var("KAKAO_AUTH_URL") {
            kakao.auth_url = parse_url("KAKAO_AUTH_URL", &url)?;
        }
        if let Ok(url) = std::env::var("KAKAO_API_URL") {
            kakao.api_url = parse_url("KAKAO_API_URL", &url)?;
        }

        let session_ttl = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|days| Duration::from_secs(days * 24 * 60 * 60))
            .unwrap_or(Duration::from_secs(7 * 24 * 60 * 60)); // 7 days default

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(Self {
            kakao,
            session_ttl,
            cookie_name: "session".to_string(),
            cookie_secure,
        })
    }

    /// Defaults for local development and tests: insecure cookies, 7-day TTL.
    pub fn local(kakao: KakaoConfig) -> Self {
        Self {
            kakao,
            session_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            cookie_name: "session".to_string(),
            cookie_secure: false,
        }
    }
}

#[cfg(feature = "mock")]
impl AuthConfig {
    /// Configuration for logging in against the mock IdP at `mock_idp_url`.
    ///
    /// Credentials fall back to placeholders since the mock IdP ignores them.
    /// Cookies are not marked secure.
    pub fn mock_from_env(mock_idp_url: Url) -> Result<Self, AuthError> {
        let base_url = parse_url(
            "AUTH_BASE_URL",
            &std::env::var("AUTH_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )?;
        let redirect_uri = base_url
            .join("/callback")
            .map_err(|e| AuthError::Config(format!("AUTH_BASE_URL: {e}")))?;

        let kakao = KakaoConfig::new(
            std::env::var("KAKAO_CLIENT_ID").unwrap_or_else(|_| "mock-client".to_string()),
            std::env::var("KAKAO_CLIENT_SECRET").unwrap_or_else(|_| "mock-secret".to_string()),
            redirect_uri,
        )
        .with_base_url(mock_idp_url);

        Ok(Self::local(kakao))
    }
}

fn required_var(name: &str) -> Result<String, AuthError> {
    std::env::var(name).map_err(|_| AuthError::Config(format!("{name} must be set")))
}

fn parse_url(name: &str, value: &str) -> Result<Url, AuthError> {
    Url::parse(value).map_err(|e| AuthError::Config(format!("{name} must be a valid URL: {e}")))
}
