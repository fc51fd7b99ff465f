//! Episode entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub u32);

impl EpisodeId {
    /// Returns the underlying value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EpisodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for EpisodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// An episode as returned by `GET /episode/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    id: EpisodeId,
    name: String,
    air_date: String,
    #[serde(rename = "episode")]
    code: String,
    characters: Vec<String>,
    url: String,
    created: String,
}

impl Episode {
    /// Creates an episode with the given ID, name and code.
    #[must_use]
    pub fn new(id: impl Into<EpisodeId>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            air_date: String::new(),
            code: code.into(),
            characters: Vec::new(),
            url: String::new(),
            created: String::new(),
        }
    }

    /// Sets the air date.
    #[must_use]
    pub fn with_air_date(mut self, air_date: impl Into<String>) -> Self {
        self.air_date = air_date.into();
        self
    }

    /// Returns the episode ID.
    #[must_use]
    pub const fn id(&self) -> EpisodeId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the air date, e.g. `December 2, 2013`.
    #[must_use]
    pub fn air_date(&self) -> &str {
        &self.air_date
    }

    /// Returns the season/episode code, e.g. `S01E01`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the URLs of the characters appearing in the episode.
    #[must_use]
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    /// Returns the resource URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the creation timestamp as sent by the API.
    #[must_use]
    pub fn created(&self) -> &str {
        &self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_date_field_mapping() {
        let json = r#"{
            "id": 28,
            "name": "The Ricklantis Mixup",
            "air_date": "September 10, 2017",
            "episode": "S03E07",
            "characters": ["https://rickandmortyapi.com/api/character/1"],
            "url": "https://rickandmortyapi.com/api/episode/28",
            "created": "2017-11-10T12:56:36.618Z"
        }"#;

        let episode: Episode = serde_json::from_str(json).unwrap();

        assert_eq!(episode.id(), EpisodeId(28));
        assert_eq!(episode.air_date(), "September 10, 2017");
        assert_eq!(episode.code(), "S03E07");
        assert_eq!(episode.characters().len(), 1);
    }

    #[test]
    fn test_episode_id_from_str() {
        assert_eq!("42".parse::<EpisodeId>(), Ok(EpisodeId(42)));
        assert!("abc".parse::<EpisodeId>().is_err());
        assert!("-1".parse::<EpisodeId>().is_err());
    }
}
