//! Character entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Returns the underlying value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CharacterId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A named place with its resource URL. Either field may be empty
/// (the API reports `"unknown"` origins with an empty URL).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Display name.
    pub name: String,
    /// Resource URL, possibly empty.
    pub url: String,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A character as returned by `GET /character`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    id: CharacterId,
    name: String,
    status: String,
    species: String,
    #[serde(rename = "type")]
    kind: String,
    gender: String,
    origin: Location,
    location: Location,
    image: String,
    #[serde(rename = "episode")]
    episodes: Vec<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    created: String,
}

impl Character {
    /// Creates a character with the given ID and name. Remaining fields are
    /// empty and can be filled with the `with_*` builders.
    #[must_use]
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: String::new(),
            species: String::new(),
            kind: String::new(),
            gender: String::new(),
            origin: Location::default(),
            location: Location::default(),
            image: String::new(),
            episodes: Vec::new(),
            url: String::new(),
            created: String::new(),
        }
    }

    /// Sets the thumbnail URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the episode URLs.
    #[must_use]
    pub fn with_episodes<I, S>(mut self, episodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.episodes = episodes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets status, species and gender.
    #[must_use]
    pub fn with_profile(
        mut self,
        status: impl Into<String>,
        species: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        self.status = status.into();
        self.species = species.into();
        self.gender = gender.into();
        self
    }

    /// Returns the character ID.
    #[must_use]
    pub const fn id(&self) -> CharacterId {
        self.id
    }

    /// Returns the character name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the status (`Alive`, `Dead` or `unknown`).
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the species.
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Returns the sub-type, usually empty.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the gender.
    #[must_use]
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Returns the origin location.
    #[must_use]
    pub const fn origin(&self) -> &Location {
        &self.origin
    }

    /// Returns the last known location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the thumbnail URL.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the URLs of every episode the character appears in.
    #[must_use]
    pub fn episodes(&self) -> &[String] {
        &self.episodes
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
