//! Error types for the accounts client.

use accountsapi_core::{CodecError, ValidationError};
use reqwest::StatusCode;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The account was rejected before anything was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The response body could not be turned into a payload.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// HTTP request error, including timeouts and connection failures.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status other than the one the operation expects.
    #[error("unexpected status {actual} (expected {expected}): {body}")]
    UnexpectedStatus {
        /// Status the operation succeeds with.
        expected: StatusCode,
        /// Status the service returned.
        actual: StatusCode,
        /// Response body, lossily decoded.
        body: String,
    },

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A header value could not be built.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if the account failed client-side validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Returns the HTTP status for [`Error::UnexpectedStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}
