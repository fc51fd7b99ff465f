//! Domain entity definitions.

mod character;
mod episode;
mod image;
mod page;

pub use character::{Character, CharacterId, Location};
pub use episode::{Episode, EpisodeId};
pub use self::image::{ImageKey, ImageSource, LoadedImage};
pub use page::{Page, PageInfo};
