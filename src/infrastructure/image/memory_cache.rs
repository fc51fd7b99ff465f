//! In-memory LRU image cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::ImageKey;
use crate::domain::ports::ImageCachePort;

/// Default maximum number of images to cache in memory.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// In-memory LRU cache for decoded images, keyed by normalized URL.
/// Inserting into a full cache evicts the least recently used entry.
pub struct MemoryImageCache {
    cache: Arc<RwLock<LruCache<ImageKey, Arc<image::DynamicImage>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    size: AtomicUsize,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(RwLock::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            size: AtomicUsize::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }

    /// Returns the maximum number of entries.
    pub async fn capacity(&self) -> usize {
        self.cache.read().await.cap().get()
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Peeks at an image without promoting it in the LRU or touching stats.
    pub async fn peek(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>> {
        let cache = self.cache.read().await;
        cache.peek(key).cloned()
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl ImageCachePort for MemoryImageCache {
    async fn get(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>> {
        let mut cache = self.cache.write().await;
        if let Some(img) = cache.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Memory cache hit");
            Some(img.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Memory cache miss");
            None
        }
    }

    async fn put(&self, key: ImageKey, image: Arc<image::DynamicImage>) {
        let mut cache = self.cache.write().await;
        debug!(key = %key, "Storing image in memory cache");
        if let Some((evicted, _)) = cache.push(key.clone(), image) {
            if evicted != key {
                debug!(key = %evicted, "Evicted least recently used image");
            }
        }
        self.size.store(cache.len(), Ordering::Release);
    }

    fn len(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
        self.size.store(0, Ordering::Release);
        debug!("Cleared memory image cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ImageKey {
        ImageKey::from_url(&format!("https://example.com/{s}.png"))
    }

    #[tokio::test]
    async fn test_cache_put_and_get() {
        let cache = MemoryImageCache::new(10);
        let img = Arc::new(image::DynamicImage::new_rgb8(100, 100));

        cache.put(key("a"), img.clone()).await;
        let retrieved = cache.get(&key("a")).await;

        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().width(), 100);
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = MemoryImageCache::new(10);
        assert!(cache.get(&key("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_eviction() {
        let cache = MemoryImageCache::new(2);
        let img = Arc::new(image::DynamicImage::new_rgb8(10, 10));

        cache.put(key("1"), img.clone()).await;
        cache.put(key("2"), img.clone()).await;
        cache.put(key("3"), img.clone()).await;

        assert!(cache.get(&key("1")).await.is_none());
        assert!(cache.get(&key("2")).await.is_some());
        assert!(cache.get(&key("3")).await.is_some());
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_get_promotes_entry() {
        let cache = MemoryImageCache::new(2);
        let img = Arc::new(image::DynamicImage::new_rgb8(10, 10));

        cache.put(key("1"), img.clone()).await;
        cache.put(key("2"), img.clone()).await;
        let _ = cache.get(&key("1")).await;
        cache.put(key("3"), img).await;

        assert!(cache.peek(&key("1")).await.is_some());
        assert!(cache.peek(&key("2")).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = MemoryImageCache::new(10);
        let img = Arc::new(image::DynamicImage::new_rgb8(10, 10));

        cache.put(key("a"), img).await;

        let _ = cache.get(&key("a")).await;
        let _ = cache.get(&key("missing")).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let cache = MemoryImageCache::new(0);
        assert_eq!(cache.capacity().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryImageCache::new(4);
        cache
            .put(key("a"), Arc::new(image::DynamicImage::new_rgb8(1, 1)))
            .await;
        cache.clear().await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_len_is_reported_while_locked() {
        let cache = MemoryImageCache::new(4);
        let img = Arc::new(image::DynamicImage::new_rgb8(1, 1));
        cache.put(key("a"), img.clone()).await;
        cache.put(key("b"), img).await;

        let guard = cache.cache.write().await;
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());
        assert_eq!(cache.stats().size, 2);
        drop(guard);
    }
}
