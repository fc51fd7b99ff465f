//! Character detail presenter.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::services::EpisodeResolver;
use crate::domain::entities::Character;
use crate::domain::ports::EpisodeListView;

use super::view_slot::ViewSlot;

/// Resolves the episodes of one character for an episode list view.
pub struct CharacterDetailPresenter {
    character: Character,
    view: Arc<ViewSlot<dyn EpisodeListView>>,
    resolver: EpisodeResolver,
}

impl CharacterDetailPresenter {
    /// Creates a presenter for `character` observing `view` without owning it.
    #[must_use]
    pub fn new(
        character: Character,
        view: &Arc<dyn EpisodeListView>,
        resolver: EpisodeResolver,
    ) -> Self {
        Self {
            character,
            view: Arc::new(ViewSlot::new(view)),
            resolver,
        }
    }

    /// Returns the presented character.
    #[must_use]
    pub const fn character(&self) -> &Character {
        &self.character
    }

    /// Replaces the observed view. Pending fetches are not delivered to it.
    pub fn attach_view(&self, view: &Arc<dyn EpisodeListView>) {
        self.view.attach(view);
    }

    /// Stops delivering results.
    pub fn detach_view(&self) {
        self.view.detach();
    }

    /// Resolves the character's episodes in the background.
    ///
    /// The view receives exactly one of `display_episodes` or
    /// `display_error`, unless it went away or a newer fetch superseded this one.
    pub fn fetch_episodes(&self) -> JoinHandle<()> {
        let ticket = self.view.begin();
        let slot = Arc::clone(&self.view);
        let resolver = self.resolver.clone();
        let character = self.character.clone();

        tokio::spawn(async move {
            let result = resolver.resolve(&character).await;

            let Some(view) = slot.deliver(ticket) else {
                debug!(
                    character_id = %character.id(),
                    ticket,
                    "Discarding episodes for stale or missing view"
                );
                return;
            };

            match result {
                Ok(episodes) => {
                    info!(
                        character_id = %character.id(),
                        count = episodes.len(),
                        "Resolved episodes"
                    );
                    view.display_episodes(&episodes);
                }
                Err(e) => {
                    warn!(character_id = %character.id(), error = %e, "Failed to resolve episodes");
                    view.display_error(&e);
                }
            }
        })
    }
}
