//! Async image loading orchestrator.
//!
//! Two tiers: Memory -> Network. Failures are never cached, so the next
//! request for a failing URL downloads again. Concurrent misses for the same
//! key share a single download.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{ImageKey, ImageSource, LoadedImage};
use crate::domain::errors::{ImageError, ImageResult};
use crate::domain::ports::{ImageCachePort, ImageFetcherPort, ImageProviderPort};
use crate::infrastructure::config::ImageConfig;

use super::fetcher::HttpImageFetcher;
use super::memory_cache::{CacheStats, MemoryImageCache};

type SharedDownload = Shared<BoxFuture<'static, ImageResult<Arc<image::DynamicImage>>>>;

/// Message sent when a background load finishes.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// The image key.
    pub key: ImageKey,
    /// The loaded image, or None if it could not be fetched or decoded.
    pub result: Option<LoadedImage>,
}

/// Orchestrates image loading from memory and network.
pub struct ImageLoader {
    handle: ImageLoaderHandle,
    request_tx: mpsc::UnboundedSender<LoaderCommand>,
    config: ImageConfig,
}

#[derive(Debug)]
enum LoaderCommand {
    Load { key: ImageKey, url: String },
    Cancel { key: ImageKey },
    CancelAll,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State for the background worker loop.
struct WorkerState {
    handle: ImageLoaderHandle,
    event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
    semaphore: Arc<Semaphore>,
    request_rx: mpsc::UnboundedReceiver<LoaderCommand>,
}

impl ImageLoader {
    /// Creates a new image loader downloading through `fetcher`. Background
    /// loads report on `event_tx`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(
        config: ImageConfig,
        fetcher: Arc<dyn ImageFetcherPort>,
        event_tx: &mpsc::UnboundedSender<ImageLoadedEvent>,
    ) -> Self {
        let handle = ImageLoaderHandle {
            memory_cache: Arc::new(MemoryImageCache::new(config.memory_cache_size)),
            fetcher,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        };

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_downloads.max(1)));

        let worker_state = WorkerState {
            handle: handle.clone(),
            event_tx: event_tx.clone(),
            semaphore,
            request_rx,
        };

        tokio::spawn(Self::run_worker_loop(worker_state));

        Self {
            handle,
            request_tx,
            config,
        }
    }

    /// Creates a loader that downloads over HTTP.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_http(
        config: ImageConfig,
        event_tx: &mpsc::UnboundedSender<ImageLoadedEvent>,
    ) -> ImageResult<Self> {
        let fetcher = Arc::new(HttpImageFetcher::new(config.timeout_secs)?);
        Ok(Self::new(config, fetcher, event_tx))
    }

    /// Worker loop to handle background load requests and throttling.
    async fn run_worker_loop(mut state: WorkerState) {
        let mut queue: VecDeque<(ImageKey, String)> = VecDeque::new();

        loop {
            tokio::select! {
                cmd = state.request_rx.recv() => {
                    match cmd {
                        Some(LoaderCommand::Load { key, url }) => {
                            if !queue.iter().any(|(queued, _)| *queued == key) {
                                queue.push_back((key, url));
                            }
                        }
                        Some(LoaderCommand::Cancel { key }) => {
                            queue.retain(|(queued, _)| *queued != key);
                        }
                        Some(LoaderCommand::CancelAll) => {
                            queue.clear();
                        }
                        None => break,
                    }
                }
                Ok(permit) = state.semaphore.clone().acquire_owned(), if !queue.is_empty() => {
                    if let Some((key, url)) = queue.pop_front() {
                        let handle = state.handle.clone();
                        let event_tx = state.event_tx.clone();

                        tokio::spawn(async move {
                            let result = handle.load(&url).await;
                            let event = ImageLoadedEvent {
                                key,
                                result: log_failure(&url, result),
                            };
                            let _ = event_tx.send(event);
                            drop(permit);
                        });
                    }
                }
            }
        }
    }

    /// Returns the image behind `url`, downloading and caching it on a miss.
    /// Download and decode failures yield `None` and are not cached.
    pub async fn get_image(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        log_failure(url, self.handle.load(url).await).map(|loaded| loaded.image)
    }

    /// Loads an image, checking the memory cache first.
    ///
    /// # Errors
    /// Returns error if the image cannot be downloaded or decoded.
    pub async fn load(&self, url: &str) -> ImageResult<LoadedImage> {
        self.handle.load(url).await
    }

    /// Checks the memory cache without promoting the entry.
    pub async fn check_memory_cache(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        self.handle.memory_cache.peek(&ImageKey::from_url(url)).await
    }

    /// Starts loading an image in the background.
    /// The result will be sent via the event channel.
    pub fn load_async(&self, url: impl Into<String>) {
        let url = url.into();
        let key = ImageKey::from_url(&url);
        if let Err(e) = self.request_tx.send(LoaderCommand::Load { key, url }) {
            error!("Failed to send load request: {}", e);
        }
    }

    /// Prefetches multiple images into cache.
    pub fn prefetch_batch<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            self.load_async(url);
        }
    }

    /// Drops a queued background load. A download already under way still
    /// completes and populates the cache.
    pub fn cancel(&self, url: &str) {
        let key = ImageKey::from_url(url);
        debug!(key = %key, "Cancelling queued image load");
        if let Err(e) = self.request_tx.send(LoaderCommand::Cancel { key }) {
            error!("Failed to send cancel request: {}", e);
        }
    }

    /// Drops every queued background load.
    pub fn cancel_all(&self) {
        if let Err(e) = self.request_tx.send(LoaderCommand::CancelAll) {
            error!("Failed to send cancel all request: {}", e);
        }
    }

    /// Returns true if a download for `url` is under way.
    #[must_use]
    pub fn is_loading(&self, url: &str) -> bool {
        self.handle
            .in_flight
            .lock()
            .contains_key(&ImageKey::from_url(url))
    }

    /// Returns the number of downloads under way.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.handle.in_flight.lock().len()
    }

    /// Returns memory cache statistics.
    #[must_use]
    pub fn memory_cache_stats(&self) -> CacheStats {
        self.handle.memory_cache.stats()
    }

    /// Clears the memory cache.
    pub async fn clear_all(&self) {
        self.handle.memory_cache.clear().await;
        debug!("Cleared image cache");
    }
}

#[async_trait::async_trait]
impl ImageProviderPort for ImageLoader {
    async fn get_image(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        Self::get_image(self, url).await
    }
}

fn log_failure(url: &str, result: ImageResult<LoadedImage>) -> Option<LoadedImage> {
    match result {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            warn!(url = %url, error = %e, "Image unavailable");
            None
        }
    }
}

/// Shared state for foreground and background loads.
#[derive(Clone)]
struct ImageLoaderHandle {
    memory_cache: Arc<MemoryImageCache>,
    fetcher: Arc<dyn ImageFetcherPort>,
    in_flight: Arc<Mutex<HashMap<ImageKey, SharedDownload>>>,
}

impl ImageLoaderHandle {
    async fn load(&self, url: &str) -> ImageResult<LoadedImage> {
        let key = ImageKey::from_url(url);

        if let Some(img) = self.memory_cache.get(&key).await {
            return Ok(LoadedImage {
                key,
                image: img,
                source: ImageSource::MemoryCache,
            });
        }

        let image = self.join_or_start_download(&key, url).await?;

        Ok(LoadedImage {
            key,
            image,
            source: ImageSource::Network,
        })
    }

    fn join_or_start_download(&self, key: &ImageKey, url: &str) -> SharedDownload {
        let mut in_flight = self.in_flight.lock();
        if let Some(pending) = in_flight.get(key) {
            trace!(key = %key, "Joining in-flight download");
            return pending.clone();
        }

        // The download runs as its own task so it finishes and fills the
        // cache even if every requester goes away.
        let handle = self.clone();
        let key_owned = key.clone();
        let url_owned = url.to_string();
        let task = tokio::spawn(async move {
            let result = handle.download_and_decode(&key_owned, &url_owned).await;
            handle.in_flight.lock().remove(&key_owned);
            result
        });

        let download = async move {
            task.await
                .unwrap_or_else(|e| Err(ImageError::Network(format!("Download task failed: {e}"))))
        }
        .boxed()
        .shared();

        in_flight.insert(key.clone(), download.clone());
        download
    }

    async fn download_and_decode(
        &self,
        key: &ImageKey,
        url: &str,
    ) -> ImageResult<Arc<image::DynamicImage>> {
        let bytes = self.fetcher.fetch(url).await?;

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| ImageError::Decode(format!("Decode task panicked: {e}")))?
            .map_err(|e| ImageError::Decode(format!("Failed to decode image: {e}")))?;

        let img = Arc::new(decoded);
        self.memory_cache.put(key.clone(), img.clone()).await;

        debug!(key = %key, source = "network", "Image loaded successfully");
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockImageFetcher, png_bytes};
    use bytes::Bytes;
    use std::time::Duration;

    const URL: &str = "https://rickandmortyapi.com/api/character/avatar/1.jpeg";

    type Events = mpsc::UnboundedReceiver<ImageLoadedEvent>;

    fn loader_with(fetcher: Arc<MockImageFetcher>) -> (ImageLoader, Events) {
        loader_with_config(
            fetcher,
            ImageConfig {
                memory_cache_size: 4,
                ..ImageConfig::default()
            },
        )
    }

    fn loader_with_config(
        fetcher: Arc<MockImageFetcher>,
        config: ImageConfig,
    ) -> (ImageLoader, Events) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ImageLoader::new(config, fetcher, &tx), rx)
    }

    async fn wait_until_cached(loader: &ImageLoader, url: &str) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while loader.check_memory_cache(url).await.is_none() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("image was never cached");
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let fetcher = Arc::new(MockImageFetcher::always(png_bytes(3, 2)));
        let (loader, _rx) = loader_with(fetcher.clone());

        let first = loader.load(URL).await.unwrap();
        let second = loader.load(URL).await.unwrap();

        assert_eq!(first.source, ImageSource::Network);
        assert_eq!(second.source, ImageSource::MemoryCache);
        assert!(Arc::ptr_eq(&first.image, &second.image));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_equivalent_urls_share_an_entry() {
        let fetcher = Arc::new(MockImageFetcher::always(png_bytes(1, 1)));
        let (loader, _rx) = loader_with(fetcher.clone());

        assert!(loader.get_image(URL).await.is_some());
        assert!(
            loader
                .get_image("HTTPS://RICKANDMORTYAPI.COM/api/character/avatar/1.jpeg")
                .await
                .is_some()
        );
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let fetcher = Arc::new(MockImageFetcher::scripted(
            vec![Err(ImageError::Network("timeout".to_string()))],
            Ok(png_bytes(2, 2)),
        ));
        let (loader, _rx) = loader_with(fetcher.clone());

        assert!(loader.get_image(URL).await.is_none());
        let retried = loader.get_image(URL).await;

        assert!(retried.is_some());
        assert_eq!(retried.unwrap().width(), 2);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_undecodable_bytes_yield_none() {
        let fetcher = Arc::new(MockImageFetcher::always(Bytes::from_static(b"<html>")));
        let (loader, _rx) = loader_with(fetcher.clone());

        assert!(loader.get_image(URL).await.is_none());
        assert!(matches!(loader.load(URL).await, Err(ImageError::Decode(_))));
        assert!(loader.check_memory_cache(URL).await.is_none());
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_download() {
        let fetcher = Arc::new(
            MockImageFetcher::always(png_bytes(4, 4)).with_delay(Duration::from_millis(50)),
        );
        let (loader, _rx) = loader_with(fetcher.clone());

        let (a, b, c) = tokio::join!(
            loader.get_image(URL),
            loader.get_image(URL),
            loader.get_image(URL)
        );

        assert!(a.is_some() && b.is_some() && c.is_some());
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(loader.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_load_async_reports_event() {
        let fetcher = Arc::new(MockImageFetcher::always(png_bytes(1, 1)));
        let (loader, mut rx) = loader_with(fetcher);

        loader.load_async(URL);
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(event.key, ImageKey::from_url(URL));
        assert!(event.result.is_some());
        assert!(loader.check_memory_cache(URL).await.is_some());
    }

    #[tokio::test]
    async fn test_load_async_reports_failure_as_none() {
        let fetcher = Arc::new(MockImageFetcher::failing());
        let (loader, mut rx) = loader_with(fetcher);

        loader.load_async(URL);
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();

        assert!(event.result.is_none());
    }

    #[tokio::test]
    async fn test_prefetch_batch_populates_cache() {
        let fetcher = Arc::new(MockImageFetcher::always(png_bytes(1, 1)));
        let (loader, mut rx) = loader_with(fetcher.clone());

        let urls = ["https://example.com/1.png", "https://example.com/2.png"];
        loader.prefetch_batch(urls);

        for _ in 0..urls.len() {
            tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
        }

        assert_eq!(loader.memory_cache_stats().size, 2);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_all_forces_refetch() {
        let fetcher = Arc::new(MockImageFetcher::always(png_bytes(1, 1)));
        let (loader, _rx) = loader_with(fetcher.clone());

        loader.get_image(URL).await;
        loader.clear_all().await;
        loader.get_image(URL).await;

        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_abandoned_request_still_populates_cache() {
        let fetcher = Arc::new(
            MockImageFetcher::always(png_bytes(2, 2)).with_delay(Duration::from_millis(100)),
        );
        let (loader, _rx) = loader_with(fetcher.clone());

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), loader.get_image(URL)).await;
        assert!(abandoned.is_err());
        assert!(loader.is_loading(URL));

        wait_until_cached(&loader, URL).await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(loader.pending_count(), 0);
        assert!(!loader.is_loading(URL));
        assert!(loader.get_image(URL).await.is_some());
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_cancel_drops_queued_load() {
        let fetcher = Arc::new(
            MockImageFetcher::always(png_bytes(1, 1)).with_delay(Duration::from_millis(100)),
        );
        let config = ImageConfig {
            max_concurrent_downloads: 1,
            ..ImageConfig::default()
        };
        let (loader, mut rx) = loader_with_config(fetcher.clone(), config);
        let queued = "https://example.com/queued.png";

        loader.load_async(URL);
        loader.load_async(queued);
        loader.cancel(queued);

        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.key, ImageKey::from_url(URL));

        let second = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(second.is_err());
        assert_eq!(fetcher.calls(), 1);
        assert!(loader.check_memory_cache(queued).await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_all_drops_every_queued_load() {
        let fetcher = Arc::new(
            MockImageFetcher::always(png_bytes(1, 1)).with_delay(Duration::from_millis(100)),
        );
        let config = ImageConfig {
            max_concurrent_downloads: 1,
            ..ImageConfig::default()
        };
        let (loader, mut rx) = loader_with_config(fetcher.clone(), config);

        loader.load_async(URL);
        tokio::time::timeout(Duration::from_secs(5), async {
            while !loader.is_loading(URL) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        loader.prefetch_batch(["https://example.com/2.png", "https://example.com/3.png"]);
        loader.cancel_all();

        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.key, ImageKey::from_url(URL));

        let next = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(next.is_err());
        assert_eq!(fetcher.calls(), 1);
    }
}
