//! Resolves a character's episode URLs into episodes.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::entities::{Character, Episode, EpisodeId};
use crate::domain::errors::FetchError;
use crate::domain::ports::CatalogPort;

/// Turns episode URL lists into ordered episodes with a single batch request.
#[derive(Clone)]
pub struct EpisodeResolver {
    catalog: Arc<dyn CatalogPort>,
}

impl EpisodeResolver {
    /// Creates new resolver.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    /// Fetches every episode the character appears in, ascending by ID.
    ///
    /// # Errors
    /// Propagates the catalog error unchanged.
    pub async fn resolve(&self, character: &Character) -> Result<Vec<Episode>, FetchError> {
        debug!(character_id = %character.id(), "Resolving episodes");
        self.resolve_urls(character.episodes()).await
    }

    /// Fetches the episodes behind `urls`, ascending by ID. URLs whose last
    /// path segment is not a number are skipped.
    ///
    /// # Errors
    /// Propagates the catalog error unchanged.
    pub async fn resolve_urls(&self, urls: &[String]) -> Result<Vec<Episode>, FetchError> {
        let ids = extract_episode_ids(urls);

        debug!(
            requested = ids.len(),
            skipped = urls.len().saturating_sub(ids.len()),
            "Fetching episode batch"
        );

        let mut episodes = self.catalog.fetch_episodes(&ids).await?;
        sort_episodes(&mut episodes);
        Ok(episodes)
    }
}

/// Extracts episode IDs from episode resource URLs, keeping first-seen order
/// and dropping duplicates and non-numeric entries.
#[must_use]
pub fn extract_episode_ids<S: AsRef<str>>(urls: &[S]) -> Vec<EpisodeId> {
    let mut seen = HashSet::new();
    urls.iter()
        .filter_map(|url| {
            let url = url.as_ref();
            let id = trailing_segment(url).and_then(|segment| segment.parse::<EpisodeId>().ok());
            if id.is_none() {
                trace!(url = %url, "Skipping episode URL without numeric ID");
            }
            id
        })
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Sorts ascending by ID and removes duplicates.
pub fn sort_episodes(episodes: &mut Vec<Episode>) {
    episodes.sort_by_key(Episode::id);
    episodes.dedup_by_key(|episode| episode.id());
}

fn trailing_segment(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}
