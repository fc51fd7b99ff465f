//! Character list presenter.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::ports::{CatalogPort, CharacterListView, ImageProviderPort};

use super::view_slot::ViewSlot;

/// Loads the character list and portraits for a list view.
pub struct CharacterListPresenter {
    view: Arc<ViewSlot<dyn CharacterListView>>,
    catalog: Arc<dyn CatalogPort>,
    images: Arc<dyn ImageProviderPort>,
}

impl CharacterListPresenter {
    /// Creates a presenter observing `view` without owning it.
    #[must_use]
    pub fn new(
        view: &Arc<dyn CharacterListView>,
        catalog: Arc<dyn CatalogPort>,
        images: Arc<dyn ImageProviderPort>,
    ) -> Self {
        Self {
            view: Arc::new(ViewSlot::new(view)),
            catalog,
            images,
        }
    }

    /// Replaces the observed view. Pending fetches are not delivered to it.
    pub fn attach_view(&self, view: &Arc<dyn CharacterListView>) {
        self.view.attach(view);
    }

    /// Stops delivering results.
    pub fn detach_view(&self) {
        self.view.detach();
    }

    /// Fetches the first page of characters in the background.
    ///
    /// The view receives exactly one of `show_characters` or `show_error`,
    /// unless it was dropped, detached, or a newer fetch started meanwhile.
    pub fn fetch_characters(&self) -> JoinHandle<()> {
        let ticket = self.view.begin();
        let slot = Arc::clone(&self.view);
        let catalog = Arc::clone(&self.catalog);

        tokio::spawn(async move {
            let result = catalog.fetch_all_characters().await;

            let Some(view) = slot.deliver(ticket) else {
                debug!(ticket, "Discarding character list for stale or missing view");
                return;
            };

            match result {
                Ok(page) => {
                    info!(
                        shown = page.results().len(),
                        total = page.count(),
                        "Loaded characters"
                    );
                    view.show_characters(page.results());
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load characters");
                    view.show_error(&e);
                }
            }
        })
    }

    /// Resolves a portrait. Failures yield `None` without touching the view.
    pub async fn fetch_image(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        self.images.get_image(url).await
    }
}
