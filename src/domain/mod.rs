//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Character, Episode, EpisodeId, Location, Page};
pub use errors::FetchError;
pub use ports::{CatalogPort, CharacterListView, EpisodeListView};
