//! Store boundary errors
//!
//! Every trait method is independently network-fallible; `StoreError` is the
//! single failure type that crosses the boundary.

/// Failure of a remote store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Store answered with a non-success status
    #[error("store rejected request ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        message: String,
    },

    /// An operation that must return a row returned none
    #[error("expected a row, store returned none")]
    MissingRow,

    /// A row addressed by id does not exist
    #[error("row not found: {0}")]
    NotFound(String),

    /// Adapter configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Store is unreachable or refused service
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether a retry of the same request could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Unavailable(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Decode(_) | Self::MissingRow | Self::NotFound(_) | Self::Config(_) => false,
        }
    }
}
