use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider answered with a non-2xx status, or could not be reached.
    ///
    /// `body` holds the raw payload so it can be relayed to the browser.
    #[error("provider error ({}): {body}", display_status(.status))]
    Provider { status: Option<u16>, body: String },

    #[error("no authenticated session")]
    SessionMissing,

    #[error("storage error: {0}")]
    Storage(String),
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no status".to_string(),
    }
}

impl AuthError {
    /// Provider failure without an HTTP status (transport or decode error).
    pub fn provider(body: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            body: body.into(),
        }
    }
}
