//! Image loading errors. These never leave the image cache boundary.

use thiserror::Error;

/// Errors that can occur while producing an image.
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    /// Download failed.
    #[error("network error: {0}")]
    Network(String),
    /// Bytes are not a supported image.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type for image operations.
pub type ImageResult<T> = std::result::Result<T, ImageError>;
