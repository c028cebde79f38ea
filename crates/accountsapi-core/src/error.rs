//! Error types for the codec.

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while encoding or decoding envelopes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input is not well-formed JSON of the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The input parsed but carries no resource data.
    #[error("incomplete payload: {0}")]
    Incomplete(&'static str),

    /// The payload could not be rendered.
    #[error("could not encode payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    /// Returns true for [`CodecError::Malformed`].
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Returns true for [`CodecError::Incomplete`].
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete(_))
    }
}
