//! HTTP handlers for auth routes.

use axum::{
    extract::{Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;
use kakaologin_core::auth::{AuthError as CoreError, ProviderProfile};
use kakaologin_core::pages::Notice;
use kakaologin_core::storage::RepositoryError;
use serde::Deserialize;

use crate::error::AuthError;
use crate::session::{removal_cookie, session_cookie, Session};
use crate::AuthState;

/// Query parameters for the OAuth callback.
#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

/// Creates the auth router with all authentication routes.
///
/// Routes:
/// - `GET /login` - Redirect to the Kakao consent screen
/// - `GET /callback` - Handle the Kakao callback
/// - `GET /logout` - Forget the profile, keep the token
/// - `GET|POST /unlink` - Disconnect the app from the Kakao account and delete the user
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
        .route("/unlink", get(unlink).post(unlink))
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

async fn login(State(state): State<AuthState>) -> Response {
    found(state.provider.authorization_url().as_str())
}

async fn callback(
    State(state): State<AuthState>,
    Query(params): Query<CallbackQuery>,
    jar: CookieJar,
    mut session: Session,
) -> Response {
    let result = complete_login(&state, &params.code, &mut session).await;

    // Whatever was written must stay reachable, failures included
    let jar = match session.id() {
        Some(id) => jar.add(session_cookie(&state.config, id)),
        None => jar,
    };

    match result {
        Ok(profile) => {
            tracing::info!(external_id = %profile.id, "User logged in");
            (jar, found("/")).into_response()
        }
        Err(e) => (jar, e).into_response(),
    }
}

/// Exchange `code`, store token and profile under a fresh session id, and
/// register the user.
async fn complete_login(
    state: &AuthState,
    code: &str,
    session: &mut Session,
) -> Result<ProviderProfile, AuthError> {
    let token = state.provider.exchange_code(code).await?;
    let access_token = token.access_token.clone();

    session.rotate().await?;
    session.set_token(token).await?;

    let profile = state.provider.fetch_profile(&access_token).await?;
    session.set_profile(profile.clone()).await?;

    sync_user(state, &profile).await?;
    Ok(profile)
}

/// Make sure a local record exists for `profile`.
async fn sync_user(state: &AuthState, profile: &ProviderProfile) -> Result<(), AuthError> {
    let exists = state
        .users
        .exists_by_external_id(&profile.id)
        .await
        .map_err(AuthError::Signup)?;
    if exists {
        return Ok(());
    }

    match state
        .users
        .insert(
            &profile.id,
            &profile.nickname,
            profile.thumbnail_image.as_deref(),
        )
        .await
    {
        Ok(()) => {
            tracing::info!(external_id = %profile.id, "Registered new user");
            Ok(())
        }
        // A concurrent login for the same account got there first
        Err(RepositoryError::AlreadyExists { .. }) => Ok(()),
        Err(e) => Err(AuthError::Signup(e)),
    }
}

async fn logout(mut session: Session) -> Result<Response, AuthError> {
    session.remove_profile().await?;
    Ok(found(&format!("/?msg={}", Notice::LOGOUT_SUCCESS)))
}

async fn unlink(
    State(state): State<AuthState>,
    jar: CookieJar,
    session: Session,
) -> Result<(CookieJar, Response), AuthError> {
    let profile = session
        .profile()
        .cloned()
        .ok_or(CoreError::SessionMissing)?;

    let access_token = session
        .token()
        .map(|token| token.access_token.clone())
        .ok_or_else(|| AuthError::Unlink("no access token in session".to_string()))?;

    state
        .provider
        .unlink(&access_token)
        .await
        .map_err(|e| AuthError::Unlink(e.to_string()))?;

    state
        .users
        .delete(&profile.id)
        .await
        .map_err(|e| AuthError::Unlink(e.to_string()))?;

    session
        .destroy()
        .await
        .map_err(|e| AuthError::Unlink(e.to_string()))?;

    tracing::info!(external_id = %profile.id, "User unlinked");
    Ok((
        jar.remove(removal_cookie(&state.config)),
        found(&format!("/?msg={}", Notice::UNLINK_SUCCESS)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, KakaoConfig};
    use crate::error::{NOT_LOGGED_IN_MESSAGE, UNLINK_FAILED_MESSAGE};
    use crate::sessions::InMemorySessionStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header::SET_COOKIE, Request};
    use http_body_util::BodyExt;
    use kakaologin_core::auth::{
        ProviderClient, ProviderToken, Result as AuthResult, SessionData, SessionId,
        SessionRepository,
    };
    use kakaologin_core::storage::{Result as RepoResult, UserRepository};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use url::Url;

    /// Provider that answers from fixed values and counts its calls.
    #[derive(Default)]
    struct FakeProvider {
        fail_exchange: bool,
        fail_profile: bool,
        fail_unlink: bool,
        exchanges: AtomicUsize,
        unlinks: AtomicUsize,
    }

    #[async_trait]
    impl ProviderClient for FakeProvider {
        fn authorization_url(&self) -> Url {
            Url::parse("https://kauth.example/oauth/authorize?client_id=abc").unwrap()
        }

        async fn exchange_code(&self, code: &str) -> AuthResult<ProviderToken> {
            self.exchanges.fetch_add(1, Ordering::SeqCst);
            if self.fail_exchange {
                return Err(CoreError::Provider {
                    status: Some(400),
                    body: r#"{"error":"invalid_grant","error_code":"KOE320"}"#.to_string(),
                });
            }
            Ok(ProviderToken {
                access_token: format!("token-for-{code}"),
                refresh_token: Some("refresh".to_string()),
            })
        }

        async fn fetch_profile(&self, _access_token: &str) -> AuthResult<ProviderProfile> {
            if self.fail_profile {
                return Err(CoreError::Provider {
                    status: Some(401),
                    body: r#"{"msg":"this access token does not exist","code":-401}"#.to_string(),
                });
            }
            Ok(kim())
        }

        async fn unlink(&self, _access_token: &str) -> AuthResult<()> {
            self.unlinks.fetch_add(1, Ordering::SeqCst);
            if self.fail_unlink {
                return Err(CoreError::Provider {
                    status: Some(401),
                    body: "expired".to_string(),
                });
            }
            Ok(())
        }
    }

    /// User repository that records every call.
    #[derive(Default)]
    struct RecordingUsers {
        records: Mutex<HashMap<String, String>>,
        fail: bool,
        calls: AtomicUsize,
        deleted: Mutex<Vec<String>>,
    }

    impl RecordingUsers {
        fn check(&self) -> RepoResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepositoryError::ConnectionFailed("db down".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for RecordingUsers {
        async fn exists_by_external_id(&self, external_id: &str) -> RepoResult<bool> {
            self.check()?;
            Ok(self.records.lock().unwrap().contains_key(external_id))
        }

        async fn insert(
            &self,
            external_id: &str,
            nickname: &str,
            _image: Option<&str>,
        ) -> RepoResult<()> {
            self.check()?;
            self.records
                .lock()
                .unwrap()
                .insert(external_id.to_string(), nickname.to_string());
            Ok(())
        }

        async fn delete(&self, external_id: &str) -> RepoResult<()> {
            self.check()?;
            self.records.lock().unwrap().remove(external_id);
            self.deleted.lock().unwrap().push(external_id.to_string());
            Ok(())
        }

        async fn get_level(&self, _external_id: &str) -> RepoResult<String> {
            self.check()?;
            Ok("Bronze".to_string())
        }
    }

    fn kim() -> ProviderProfile {
        ProviderProfile {
            id: "42".to_string(),
            nickname: "Kim".to_string(),
            thumbnail_image: Some("http://x/y.jpg".to_string()),
        }
    }

    struct Harness {
        sessions: Arc<InMemorySessionStore>,
        users: Arc<RecordingUsers>,
        provider: Arc<FakeProvider>,
        app: Router,
    }

    fn harness(provider: FakeProvider, users: RecordingUsers) -> Harness {
        let sessions = Arc::new(InMemorySessionStore::new());
        let users = Arc::new(users);
        let provider = Arc::new(provider);
        let config = AuthConfig::local(KakaoConfig::new(
            "client",
            "secret",
            Url::parse("http://localhost:3000/callback").unwrap(),
        ));
        let state = AuthState::with_provider(
            sessions.clone(),
            users.clone(),
            provider.clone(),
            config,
        );

        Harness {
            sessions,
            users,
            provider,
            app: auth_routes().with_state(state),
        }
    }

    /// Store `data` under a known id and return the cookie header for it.
    async fn seed_session(sessions: &InMemorySessionStore, data: SessionData) -> (SessionId, String) {
        let id = SessionId::new("seeded-session".to_string());
        sessions.save(&id, &data).await.unwrap();
        let cookie = format!("session={}", id);
        (id, cookie)
    }

    fn logged_in() -> SessionData {
        SessionData {
            token: Some(ProviderToken {
                access_token: "access".to_string(),
                refresh_token: None,
            }),
            profile: Some(kim()),
        }
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[LOCATION].to_str().unwrap()
    }

    /// Session id from the `Set-Cookie` header.
    fn set_cookie_id(response: &Response) -> SessionId {
        let header = response.headers()[SET_COOKIE].to_str().unwrap();
        let value = header
            .strip_prefix("session=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        SessionId::new(value.to_string())
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_login_redirects_to_provider() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());

        let response = h.app.oneshot(get("/login", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            location(&response),
            "https://kauth.example/oauth/authorize?client_id=abc"
        );
    }

    #[tokio::test]
    async fn test_callback_populates_session_and_redirects_home() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());

        let response = h
            .app
            .oneshot(get("/callback?code=abc", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/");

        let id = set_cookie_id(&response);
        let stored = h.sessions.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.token.unwrap().access_token, "token-for-abc");
        assert_eq!(stored.profile, Some(kim()));
        assert_eq!(
            h.users.records.lock().unwrap().get("42").map(String::as_str),
            Some("Kim")
        );
    }

    #[tokio::test]
    async fn test_callback_without_code_is_bad_request() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());

        let response = h.app.oneshot(get("/callback", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.provider.exchanges.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_callback_exchange_failure_leaves_session_unchanged() {
        let h = harness(
            FakeProvider {
                fail_exchange: true,
                ..Default::default()
            },
            RecordingUsers::default(),
        );
        let before = logged_in();
        let (id, cookie) = seed_session(&h.sessions, before.clone()).await;

        let response = h
            .app
            .oneshot(get("/callback?code=stale", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("KOE320"));
        assert_eq!(h.sessions.load(&id).await.unwrap(), Some(before));
        assert_eq!(h.users.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_callback_repository_failure_returns_json_500() {
        let h = harness(
            FakeProvider::default(),
            RecordingUsers {
                fail: true,
                ..Default::default()
            },
        );

        let response = h
            .app
            .oneshot(get("/callback?code=abc", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(LOCATION).is_none());
        let id = set_cookie_id(&response);
        let stored = h.sessions.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.profile, Some(kim()));
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_callback_profile_failure_relays_payload_and_sends_cookie() {
        let h = harness(
            FakeProvider {
                fail_profile: true,
                ..Default::default()
            },
            RecordingUsers::default(),
        );

        let response = h
            .app
            .oneshot(get("/callback?code=abc", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let id = set_cookie_id(&response);
        assert!(body_text(response).await.contains("-401"));

        let stored = h.sessions.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.token.unwrap().access_token, "token-for-abc");
        assert!(stored.profile.is_none());
        assert_eq!(h.sessions.len().await, 1);
        assert_eq!(h.users.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_callback_profile_failure_drops_previous_profile() {
        let h = harness(
            FakeProvider {
                fail_profile: true,
                ..Default::default()
            },
            RecordingUsers::default(),
        );
        let (old_id, cookie) = seed_session(&h.sessions, logged_in()).await;

        let response = h
            .app
            .oneshot(get("/callback?code=other", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let id = set_cookie_id(&response);
        assert_ne!(id, old_id);
        assert!(h.sessions.load(&old_id).await.unwrap().is_none());

        let stored = h.sessions.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.token.unwrap().access_token, "token-for-other");
        assert!(stored.profile.is_none());
    }

    #[tokio::test]
    async fn test_callback_issues_new_session_id() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());
        let (old_id, cookie) = seed_session(
            &h.sessions,
            SessionData {
                token: Some(ProviderToken {
                    access_token: "left-after-logout".to_string(),
                    refresh_token: None,
                }),
                profile: None,
            },
        )
        .await;

        let response = h
            .app
            .oneshot(get("/callback?code=abc", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(location(&response), "/");
        let id = set_cookie_id(&response);
        assert_ne!(id, old_id);
        assert!(h.sessions.load(&old_id).await.unwrap().is_none());
        let stored = h.sessions.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.profile, Some(kim()));
        assert_eq!(h.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_double_login_creates_one_record() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());

        for _ in 0..2 {
            let response = h
                .app
                .clone()
                .oneshot(get("/callback?code=abc", None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FOUND);
        }

        assert_eq!(h.users.records.lock().unwrap().len(), 1);
        // exists + insert, then exists only
        assert_eq!(h.users.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_logout_clears_only_profile() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());
        let (id, cookie) = seed_session(&h.sessions, logged_in()).await;

        let response = h
            .app
            .oneshot(get("/logout", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?msg=logoutsuccess");
        let stored = h.sessions.load(&id).await.unwrap().unwrap();
        assert!(stored.profile.is_none());
        assert_eq!(stored.token.unwrap().access_token, "access");
    }

    #[tokio::test]
    async fn test_logout_without_session_redirects() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());

        let response = h.app.oneshot(get("/logout", None)).await.unwrap();

        assert_eq!(location(&response), "/?msg=logoutsuccess");
        assert!(h.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_unlink_without_session_is_unauthorized() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/unlink")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, NOT_LOGGED_IN_MESSAGE);
        assert_eq!(h.provider.unlinks.load(Ordering::SeqCst), 0);
        assert_eq!(h.users.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unlink_success_deletes_user_and_session() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());
        let (id, cookie) = seed_session(&h.sessions, logged_in()).await;

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/unlink")
                    .header("Cookie", &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?msg=inlinkSuccess");
        assert!(response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("session="));
        assert_eq!(h.provider.unlinks.load(Ordering::SeqCst), 1);
        assert_eq!(*h.users.deleted.lock().unwrap(), vec!["42".to_string()]);
        assert!(h.sessions.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unlink_via_get() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());
        let (_, cookie) = seed_session(&h.sessions, logged_in()).await;

        let response = h
            .app
            .oneshot(get("/unlink", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(location(&response), "/?msg=inlinkSuccess");
    }

    #[tokio::test]
    async fn test_unlink_provider_failure_keeps_user() {
        let h = harness(
            FakeProvider {
                fail_unlink: true,
                ..Default::default()
            },
            RecordingUsers::default(),
        );
        let (id, cookie) = seed_session(&h.sessions, logged_in()).await;

        let response = h
            .app
            .oneshot(get("/unlink", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, UNLINK_FAILED_MESSAGE);
        assert!(h.users.deleted.lock().unwrap().is_empty());
        assert!(h.sessions.load(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unlink_repository_failure() {
        let h = harness(
            FakeProvider::default(),
            RecordingUsers {
                fail: true,
                ..Default::default()
            },
        );
        let (id, cookie) = seed_session(&h.sessions, logged_in()).await;

        let response = h
            .app
            .oneshot(get("/unlink", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, UNLINK_FAILED_MESSAGE);
        assert!(h.sessions.load(&id).await.unwrap().is_some());
    }

    /// Session store whose deletes always fail.
    struct UndeletableSessions(InMemorySessionStore);

    #[async_trait]
    impl SessionRepository for UndeletableSessions {
        async fn load(&self, id: &SessionId) -> AuthResult<Option<SessionData>> {
            self.0.load(id).await
        }

        async fn save(&self, id: &SessionId, data: &SessionData) -> AuthResult<()> {
            self.0.save(id, data).await
        }

        async fn delete(&self, _id: &SessionId) -> AuthResult<()> {
            Err(CoreError::Storage("store unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unlink_session_delete_failure_reports_unlink_failure() {
        let sessions = Arc::new(UndeletableSessions(InMemorySessionStore::new()));
        let (_, cookie) = seed_session(&sessions.0, logged_in()).await;
        let state = AuthState::with_provider(
            sessions,
            Arc::new(RecordingUsers::default()),
            Arc::new(FakeProvider::default()),
            AuthConfig::local(KakaoConfig::new(
                "client",
                "secret",
                Url::parse("http://localhost:3000/callback").unwrap(),
            )),
        );

        let response = auth_routes()
            .with_state(state)
            .oneshot(get("/unlink", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, UNLINK_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unlink_without_token() {
        let h = harness(FakeProvider::default(), RecordingUsers::default());
        let (_, cookie) = seed_session(
            &h.sessions,
            SessionData {
                token: None,
                profile: Some(kim()),
            },
        )
        .await;

        let response = h
            .app
            .oneshot(get("/unlink", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(h.provider.unlinks.load(Ordering::SeqCst), 0);
    }
}
