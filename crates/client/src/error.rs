//! Error taxonomy for API calls.

use thiserror::Error;

/// Errors surfaced by the resource clients and the session store.
///
/// Callers distinguish four situations: authentication failures (force a
/// logout), not-found/conflict (inline message, no retry), transport
/// failures (inline message, no retry), and everything else the backend
/// reports. Nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// 401/403 - the session is no longer valid.
    #[error("Unauthorized: session rejected by the API")]
    Unauthorized,

    /// 404 - the resource does not exist (or was logically deleted).
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409 - the request conflicts with current server state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request could not be built from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// True for 401/403 responses, which must end the local session.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
