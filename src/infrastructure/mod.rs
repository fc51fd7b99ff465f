//! Infrastructure layer with external service adapters.

/// Rick and Morty API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Image handling (caching, loading).
pub mod image;

pub use api::{RICK_AND_MORTY_API_BASE, RickAndMortyClient};
pub use config::{
    ApiConfig, AppConfig, CliArgs, ConfigError, ImageConfig, LogLevel, StorageManager,
};
pub use self::image::{
    CacheStats, HttpImageFetcher, ImageLoadedEvent, ImageLoader, MemoryImageCache,
};
