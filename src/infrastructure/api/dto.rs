use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Error body the API sends with 4xx responses, e.g.
/// `{"error": "Episode not found"}`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from the API.
    pub error: String,
}

/// Body of `GET /episode/{ids}`: a bare object for a single ID, an array
/// for several.
#[derive(Debug)]
pub enum OneOrMany<T> {
    /// A single object.
    One(T),
    /// An array.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flattens into a sequence.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let decoded = if value.is_array() {
            serde_json::from_value(value).map(Self::Many)
        } else {
            serde_json::from_value(value).map(Self::One)
        };
        decoded.map_err(serde::de::Error::custom)
    }
}
