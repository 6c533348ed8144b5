//! Errors surfaced by the API client and token store.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered 401. The stored credential has been cleared
    /// unless `store_error` says otherwise; the caller is expected to send
    /// the user to `login_path`.
    #[error("Session invalidated, log in again at {login_path}")]
    SessionInvalidated {
        login_path: String,
        store_error: Option<String>,
    },

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Token store error: {0}")]
    Store(String),
}

impl ApiError {
    pub fn is_session_invalidated(&self) -> bool {
        matches!(self, ApiError::SessionInvalidated { .. })
    }

    /// HTTP status for errors that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::SessionInvalidated { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
