use rand::{distr::Alphanumeric, Rng};
use url::Url;

use super::SessionId;

/// Scopes requested at login.
pub const DEFAULT_SCOPES: &[&str] = &["profile_nickname", "profile_image"];

/// Generate a cryptographically random session ID.
pub fn generate_session_id() -> SessionId {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    SessionId::new(id)
}

/// Build the authorization URL for the authorization-code grant.
///
/// Existing query parameters on `authorize_endpoint` are kept. Scopes are
/// joined with commas, which is the separator Kakao expects.
pub fn build_authorization_url(
    authorize_endpoint: &Url,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[&str],
) -> Url {
    let mut url = authorize_endpoint.clone();
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &scopes.join(","));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://kauth.kakao.com/oauth/authorize").unwrap()
    }

    fn query(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn generate_session_id_produces_32_char_alphanumeric() {
        let id = generate_session_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generate_session_id_is_unique() {
        let id1 = generate_session_id();
        let id2 = generate_session_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn authorization_url_carries_grant_parameters() {
        let url = build_authorization_url(
            &endpoint(),
            "client-123",
            "http://localhost:3000/callback",
            DEFAULT_SCOPES,
        );

        assert_eq!(url.path(), "/oauth/authorize");
        assert_eq!(query(&url, "client_id").as_deref(), Some("client-123"));
        assert_eq!(
            query(&url, "redirect_uri").as_deref(),
            Some("http://localhost:3000/callback")
        );
        assert_eq!(query(&url, "response_type").as_deref(), Some("code"));
        assert_eq!(
            query(&url, "scope").as_deref(),
            Some("profile_nickname,profile_image")
        );
    }

    #[test]
    fn authorization_url_encodes_redirect_uri() {
        let url = build_authorization_url(
            &endpoint(),
            "client",
            "http://localhost:3000/callback?next=/a b",
            DEFAULT_SCOPES,
        );

        let raw = url.query().unwrap();
        assert!(!raw.contains(' '));
        assert!(raw.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback%3Fnext%3D%2Fa+b"));
        assert_eq!(
            query(&url, "redirect_uri").as_deref(),
            Some("http://localhost:3000/callback?next=/a b")
        );
    }

    #[test]
    fn authorization_url_keeps_existing_query() {
        let endpoint = Url::parse("http://localhost:3001/oauth/authorize?prompt=login").unwrap();
        let url = build_authorization_url(&endpoint, "c", "http://r", &["a"]);

        assert_eq!(query(&url, "prompt").as_deref(), Some("login"));
        assert_eq!(query(&url, "scope").as_deref(), Some("a"));
    }
}
