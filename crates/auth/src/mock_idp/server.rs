//! Mock Kakao IdP server for development and testing.
//!
//! This server simulates the Kakao authorization and resource servers,
//! allowing full E2E testing of the auth flow without real credentials.
//! Authorization codes and access tokens are the same opaque string: the
//! base64 encoded profile, so the server keeps no state.

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use base64::Engine;
use kakaologin_core::auth::ProviderProfile;
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use url::Url;

use super::templates;

#[derive(Deserialize)]
struct AuthorizeQuery {
    client_id: String,
    redirect_uri: String,
    #[serde(default)]
    scope: String,
}

#[derive(Deserialize)]
struct ConsentForm {
    id: String,
    nickname: String,
    thumbnail_image: Option<String>,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct TokenForm {
    grant_type: String,
    code: String,
}

/// Encode a profile as a mock authorization code.
pub fn mock_code(profile: &ProviderProfile) -> String {
    let json = serde_json::to_vec(profile).unwrap_or_default();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json)
}

/// Decode a mock authorization code or access token back into its profile.
pub fn decode_mock_code(code: &str) -> Option<ProviderProfile> {
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(code)
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Mock IdP server that simulates the Kakao OAuth2 endpoints.
pub struct MockIdpServer {
    port: u16,
}

impl MockIdpServer {
    /// Create a new Mock IdP server.
    ///
    /// # Arguments
    /// * `port` - The port to listen on (typically 3001)
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Routes served by the mock IdP:
    ///
    /// - `GET /oauth/authorize` - Consent page
    /// - `POST /oauth/authorize/submit` - Form submission, redirects with a code
    /// - `POST /oauth/token` - Code exchange
    /// - `GET /v2/user/me` - Profile lookup
    /// - `POST /v1/user/unlink` - Unlink
    pub fn router() -> Router {
        Router::new()
            .route("/oauth/authorize", get(authorize))
            .route("/oauth/authorize/submit", post(authorize_submit))
            .route("/oauth/token", post(token))
            .route("/v2/user/me", get(user_me))
            .route("/v1/user/unlink", post(unlink))
    }

    /// Run the Mock IdP server on localhost.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        tracing::info!("Mock IdP server listening on http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, Self::router()).await
    }
}

async fn authorize(Query(params): Query<AuthorizeQuery>) -> Html<String> {
    Html(templates::login_page(
        &params.client_id,
        &params.redirect_uri,
        &params.scope,
    ))
}

async fn authorize_submit(Form(form): Form<ConsentForm>) -> Response {
    let profile = ProviderProfile {
        id: form.id,
        nickname: form.nickname,
        thumbnail_image: form.thumbnail_image.filter(|s| !s.trim().is_empty()),
    };

    let mut callback = match Url::parse(&form.redirect_uri) {
        Ok(url) => url,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid redirect_uri").into_response(),
    };
    callback
        .query_pairs_mut()
        .append_pair("code", &mock_code(&profile));

    Redirect::to(callback.as_str()).into_response()
}

async fn token(Form(form): Form<TokenForm>) -> Response {
    let profile = match decode_mock_code(&form.code) {
        Some(profile) if form.grant_type == "authorization_code" => profile,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "invalid_grant",
                    "error_description": format!("authorization code not found for code={}", form.code),
                    "error_code": "KOE320",
                })),
            )
                .into_response()
        }
    };

    Json(serde_json::json!({
        "token_type": "bearer",
        "access_token": form.code,
        "expires_in": 21599,
        "refresh_token": format!("mock-refresh-{}", profile.id),
        "refresh_token_expires_in": 5183999,
    }))
    .into_response()
}

/// Resolve the bearer token to its profile, or build Kakao's 401 reply.
fn bearer_profile(headers: &HeaderMap) -> Result<ProviderProfile, Response> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(decode_mock_code)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "msg": "this access token does not exist",
                    "code": -401,
                })),
            )
                .into_response()
        })
}

/// Kakao ids are numbers on the wire.
fn wire_id(id: &str) -> serde_json::Value {
    match id.parse::<i64>() {
        Ok(n) => serde_json::json!(n),
        Err(_) => serde_json::json!(id),
    }
}

async fn user_me(headers: HeaderMap) -> Response {
    let profile = match bearer_profile(&headers) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    Json(serde_json::json!({
        "id": wire_id(&profile.id),
        "connected_at": "2024-01-01T00:00:00Z",
        "properties": {
            "nickname": profile.nickname,
            "thumbnail_image": profile.thumbnail_image,
        },
    }))
    .into_response()
}

async fn unlink(headers: HeaderMap) -> Response {
    match bearer_profile(&headers) {
        Ok(profile) => Json(serde_json::json!({ "id": wire_id(&profile.id) })).into_response(),
        Err(response) => response,
    }
}
