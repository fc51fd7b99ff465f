//! Presenters mediating between the catalog and the views.

mod character_detail;
mod character_list;
mod view_slot;

pub use character_detail::CharacterDetailPresenter;
pub use character_list::CharacterListPresenter;
pub use view_slot::ViewSlot;
