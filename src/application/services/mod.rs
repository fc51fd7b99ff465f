//! Application services.

mod episode_resolver;

pub use episode_resolver::{EpisodeResolver, extract_episode_ids, sort_episodes};
