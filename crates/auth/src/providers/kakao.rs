//! Kakao OAuth2 provider implementation.

use async_trait::async_trait;
use kakaologin_core::auth::{
    build_authorization_url, AuthError, ProviderClient, ProviderProfile, ProviderToken, Result,
    DEFAULT_SCOPES,
};
use kakaologin_core::serde::{deserialize_id_as_string, deserialize_optional_string};
use reqwest::{redirect::Policy, Response};
use serde::Deserialize;
use url::Url;

use crate::config::KakaoConfig;

/// `GET /v2/user/me` payload, reduced to the fields we keep.
///
/// Older apps receive nickname and thumbnail under `properties`; newer
/// ones only under `kakao_account.profile`. Both are read.
#[derive(Debug, Deserialize)]
struct KakaoUser {
    #[serde(deserialize_with = "deserialize_id_as_string")]
    id: String,
    #[serde(default)]
    properties: Option<KakaoProperties>,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoProperties {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    nickname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    thumbnail_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    profile: Option<KakaoAccountProfile>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccountProfile {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    nickname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    thumbnail_image_url: Option<String>,
}

impl From<KakaoUser> for ProviderProfile {
    fn from(user: KakaoUser) -> Self {
        let properties = user.properties.unwrap_or_default();
        let account_profile = user
            .kakao_account
            .and_then(|account| account.profile)
            .unwrap_or_default();

        ProviderProfile {
            id: user.id,
            nickname: properties
                .nickname
                .or(account_profile.nickname)
                .unwrap_or_default(),
            thumbnail_image: properties
                .thumbnail_image
                .or(account_profile.thumbnail_image_url),
        }
    }
}

/// Kakao OAuth2 provider.
pub struct KakaoProvider {
    config: KakaoConfig,
    http_client: reqwest::Client,
    authorize_endpoint: Url,
    token_endpoint: Url,
    profile_endpoint: Url,
    unlink_endpoint: Url,
}

impl KakaoProvider {
    /// Create a new Kakao provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or an endpoint
    /// cannot be derived from the configured base URLs.
    pub fn new(config: &KakaoConfig) -> Result<Self> {
        // Build HTTP client without redirect following (security requirement)
        let http_client = reqwest::ClientBuilder::new()
            .redirect(Policy::none())
            .build()
            .map_err(|e| AuthError::provider(format!("Failed to build HTTP client: {}", e)))?;

        let join = |base: &Url, path: &str| {
            base.join(path)
                .map_err(|e| AuthError::provider(format!("Invalid endpoint {path}: {e}")))
        };

        Ok(Self {
            authorize_endpoint: join(&config.auth_url, "/oauth/authorize")?,
            token_endpoint: join(&config.auth_url, "/oauth/token")?,
            profile_endpoint: join(&config.api_url, "/v2/user/me")?,
            unlink_endpoint: join(&config.api_url, "/v1/user/unlink")?,
            config: config.clone(),
            http_client,
        })
    }
}

/// Pass 2xx responses through, turn everything else into a provider error
/// carrying the raw body.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Provider {
        status: Some(status.as_u16()),
        body,
    })
}

fn transport_error(e: reqwest::Error) -> AuthError {
    AuthError::provider(e.to_string())
}

#[async_trait]
impl ProviderClient for KakaoProvider {
    fn authorization_url(&self) -> Url {
        build_authorization_url(
            &self.authorize_endpoint,
            &self.config.client_id,
            self.config.redirect_uri.as_str(),
            DEFAULT_SCOPES,
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderToken> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self
            .http_client
            .post(self.token_endpoint.clone())
            .form(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let token = ensure_success(response)
            .await?
            .json::<ProviderToken>()
            .await
            .map_err(transport_error)?;

        tracing::debug!(
            has_refresh_token = token.refresh_token.is_some(),
            "Exchanged authorization code"
        );
        Ok(token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile> {
        let response = self
            .http_client
            .get(self.profile_endpoint.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let user = ensure_success(response)
            .await?
            .json::<KakaoUser>()
            .await
            .map_err(transport_error)?;

        Ok(user.into())
    }

    async fn unlink(&self, access_token: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.unlink_endpoint.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        Ok(())
    }
}
