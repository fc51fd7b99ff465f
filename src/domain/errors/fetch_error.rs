//! API fetch error types.

use thiserror::Error;

/// Failure of a request against the catalog API.
///
/// None of these are fatal: issuing the same request again may succeed.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("network error: {message}")]
    Transport { message: String },

    #[error("received empty data from server")]
    EmptyBody,

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

impl FetchError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Returns whether a later identical request may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::decode(e.to_string())
    }
}
