//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - HTTP downloading
//! - Async image loading with shared in-flight downloads

/// HTTP downloads.
pub mod fetcher;
/// Loading orchestration.
pub mod loader;
/// LRU memory cache.
pub mod memory_cache;

pub use fetcher::HttpImageFetcher;
pub use loader::{ImageLoadedEvent, ImageLoader};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, MemoryImageCache};
