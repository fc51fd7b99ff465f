//! Application layer with presenters and services.

/// Presenters driving the views.
pub mod presenters;
/// Application services.
pub mod services;

pub use presenters::{CharacterDetailPresenter, CharacterListPresenter};
pub use services::EpisodeResolver;
