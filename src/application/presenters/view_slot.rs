//! Weak view reference with request generations.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Holds a presenter's view without keeping it alive.
///
/// Every request takes a ticket. A completion is delivered only while its
/// ticket is the latest one and the view still exists. Attaching or
/// detaching a view invalidates outstanding tickets.
pub struct ViewSlot<V: ?Sized> {
    state: RwLock<SlotState<V>>,
}

// Generation and view change together so a delivery never pairs an old
// ticket with a newly attached view.
struct SlotState<V: ?Sized> {
    generation: u64,
    view: Option<Weak<V>>,
}

impl<V: ?Sized> ViewSlot<V> {
    /// Creates a slot observing `view`.
    #[must_use]
    pub fn new(view: &Arc<V>) -> Self {
        Self {
            state: RwLock::new(SlotState {
                generation: 0,
                view: Some(Arc::downgrade(view)),
            }),
        }
    }

    /// Replaces the observed view.
    pub fn attach(&self, view: &Arc<V>) {
        let mut state = self.state.write();
        state.view = Some(Arc::downgrade(view));
        state.generation += 1;
    }

    /// Stops delivering to any view.
    pub fn detach(&self) {
        let mut state = self.state.write();
        state.view = None;
        state.generation += 1;
    }

    /// Returns true while a live view is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state
            .read()
            .view
            .as_ref()
            .is_some_and(|view| view.strong_count() > 0)
    }

    /// Starts a request, superseding every earlier one.
    pub fn begin(&self) -> u64 {
        let mut state = self.state.write();
        state.generation += 1;
        state.generation
    }

    /// Returns the view if `ticket` is still current and the view is alive.
    #[must_use]
    pub fn deliver(&self, ticket: u64) -> Option<Arc<V>> {
        let state = self.state.read();
        if state.generation != ticket {
            return None;
        }
        state.view.as_ref()?.upgrade()
    }
}
