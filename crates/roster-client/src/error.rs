//! Resource client error types.

use thiserror::Error;

/// Errors returned by resource client calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered 403. Navigation to the login route has already been
    /// requested by the time the caller sees this.
    #[error("forbidden (403): sign in again")]
    Forbidden,

    /// The API returned a non-success status other than 403.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// HTTP transport or body decoding error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The call was rejected before any request was built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}
