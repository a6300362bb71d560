//! Page-level error type.

use thiserror::Error;

use casita_azul_client::ApiError;

/// Errors surfaced by the page controllers.
///
/// Validation failures happen client-side and block submission - no request
/// is sent. Everything else wraps the underlying [`ApiError`].
#[derive(Debug, Error)]
pub enum PageError {
    /// The bound form is invalid; nothing was transmitted.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PageError {
    /// True when the wrapped API error is a 401/403, which forces a logout.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth_failure())
    }
}
