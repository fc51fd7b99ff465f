//! Catalog port for fetching characters and episodes.

use async_trait::async_trait;

use crate::domain::entities::{Character, Episode, EpisodeId, Page};
use crate::domain::errors::FetchError;

/// Port for reading the character/episode catalog.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches the first page of characters.
    async fn fetch_all_characters(&self) -> Result<Page<Character>, FetchError>;

    /// Fetches a single episode.
    async fn fetch_episode(&self, id: EpisodeId) -> Result<Episode, FetchError>;

    /// Fetches several episodes in one request. Order of the result is
    /// whatever the server returns.
    async fn fetch_episodes(&self, ids: &[EpisodeId]) -> Result<Vec<Episode>, FetchError>;
}
