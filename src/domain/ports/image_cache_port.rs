//! Port definitions for image caching and fetching.

use std::sync::Arc;

use bytes::Bytes;

use crate::domain::entities::ImageKey;
use crate::domain::errors::ImageResult;

/// Port for image caching operations.
/// Implementations must be thread-safe.
#[async_trait::async_trait]
pub trait ImageCachePort: Send + Sync {
    /// Attempts to get an image from the cache.
    /// Returns None if not cached.
    async fn get(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>>;

    /// Stores an image in the cache.
    async fn put(&self, key: ImageKey, image: Arc<image::DynamicImage>);

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all images from the cache.
    async fn clear(&self);
}

/// Port for downloading raw image bytes.
#[async_trait::async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the bytes behind `url`.
    async fn fetch(&self, url: &str) -> ImageResult<Bytes>;
}

/// Port the presenters use to resolve a character portrait.
#[async_trait::async_trait]
pub trait ImageProviderPort: Send + Sync {
    /// Returns the decoded image behind `url`, or `None` if it is unavailable.
    async fn get_image(&self, url: &str) -> Option<Arc<image::DynamicImage>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::errors::ImageError;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Encodes a tiny PNG for use as a fetch response.
    pub fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        Bytes::from(out.into_inner())
    }

    /// Fetcher that replays scripted responses and counts calls.
    /// Once the script is exhausted every call returns `fallback`.
    pub struct MockImageFetcher {
        script: Mutex<VecDeque<ImageResult<Bytes>>>,
        fallback: ImageResult<Bytes>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockImageFetcher {
        /// Creates a fetcher that always returns `bytes`.
        pub fn always(bytes: Bytes) -> Self {
            Self::scripted(Vec::new(), Ok(bytes))
        }

        /// Creates a fetcher that always fails.
        pub fn failing() -> Self {
            Self::scripted(
                Vec::new(),
                Err(ImageError::Network("connection refused".to_string())),
            )
        }

        /// Creates a fetcher that returns `script` in order, then `fallback`.
        pub fn scripted(script: Vec<ImageResult<Bytes>>, fallback: ImageResult<Bytes>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Makes every fetch sleep before answering.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Returns how many fetches were made.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch(&self, _url: &str) -> ImageResult<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self.script.lock().pop_front();
            next.unwrap_or_else(|| self.fallback.clone())
        }
    }
}
