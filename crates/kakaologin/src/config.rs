use std::env;

/// Application configuration loaded from environment variables.
///
/// Provider credentials and cookie settings live in
/// [`kakaologin_auth::AuthConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite user database (default: "kakaologin.db")
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// sqlx URL of the SQLite session database (default: "sqlite:sessions.db?mode=rwc")
    /// Note: Only used when the `auth-sqlite` feature is enabled.
    #[allow(dead_code)]
    pub session_sqlite_url: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `auth-redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Port of the mock IdP (default: 3001)
    /// Note: Only used when the `auth-mock` feature is enabled.
    #[allow(dead_code)]
    pub mock_idp_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite user database path (default: "kakaologin.db")
    /// - `SESSION_SQLITE_URL` - Session database URL (default: "sqlite:sessions.db?mode=rwc")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `MOCK_IDP_PORT` - Mock IdP port (default: 3001)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "kakaologin.db".to_string()),
            session_sqlite_url: env::var("SESSION_SQLITE_URL")
                .unwrap_or_else(|_| "sqlite:sessions.db?mode=rwc".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            mock_idp_port: env::var("MOCK_IDP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
