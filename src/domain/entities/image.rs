//! Domain types for image handling.

use std::sync::Arc;

use url::Url;

/// Cache key for an image: its URL in normalized form.
///
/// Normalization lowercases scheme and host, drops default ports and the
/// fragment. Strings that do not parse as URLs are kept trimmed but otherwise
/// verbatim so they still map to a stable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    /// Creates a key from a raw image URL.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim();
        match Url::parse(trimmed) {
            Ok(mut parsed) => {
                parsed.set_fragment(None);
                Self(parsed.into())
            }
            Err(_) => Self(trimmed.to_string()),
        }
    }

    /// Returns the normalized URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageKey {
    fn from(s: &str) -> Self {
        Self::from_url(s)
    }
}

/// Where an image was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory LRU cache.
    MemoryCache,
    /// Downloaded and decoded.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A decoded image together with its key and origin.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Cache key.
    pub key: ImageKey,
    /// Decoded image, shared with the cache.
    pub image: Arc<image::DynamicImage>,
    /// Where it came from.
    pub source: ImageSource,
}
