//! HTTP image downloader.

use bytes::Bytes;
use tracing::debug;

use crate::domain::errors::{ImageError, ImageResult};
use crate::domain::ports::ImageFetcherPort;

/// Downloads image bytes over HTTP.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the given request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout_secs: u64) -> ImageResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ImageError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> ImageResult<Bytes> {
        debug!(url = %url, "Downloading image");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ImageError::Network(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| ImageError::Network(format!("Failed to read body: {e}")))
    }
}
