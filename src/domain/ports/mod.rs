mod catalog_port;
mod image_cache_port;
mod view_port;

pub use catalog_port::CatalogPort;
pub use image_cache_port::{ImageCachePort, ImageFetcherPort, ImageProviderPort};
pub use view_port::{CharacterListView, EpisodeListView};

#[cfg(test)]
pub mod mocks {
    pub use super::catalog_port::mock::MockCatalog;
    pub use super::image_cache_port::mock::{MockImageFetcher, png_bytes};
    pub use super::view_port::mock::{CallLog, RecordingView, ViewCall};
}
