//! View contracts the presentation layer implements.

use crate::domain::entities::{Character, Episode};
use crate::domain::errors::FetchError;

/// Receives the outcome of a character list fetch.
pub trait CharacterListView: Send + Sync {
    /// Shows the fetched characters.
    fn show_characters(&self, characters: &[Character]);

    /// Shows a fetch failure.
    fn show_error(&self, error: &FetchError);
}

/// Receives the outcome of an episode resolution.
pub trait EpisodeListView: Send + Sync {
    /// Shows episodes in ascending ID order.
    fn display_episodes(&self, episodes: &[Episode]);

    /// Shows a fetch failure.
    fn display_error(&self, error: &FetchError);
}
