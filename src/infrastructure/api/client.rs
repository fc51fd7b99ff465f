//! Rick and Morty API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ErrorResponse, OneOrMany};
use crate::domain::entities::{Character, Episode, EpisodeId, Page};
use crate::domain::errors::FetchError;
use crate::domain::ports::CatalogPort;
use crate::infrastructure::config::ApiConfig;

/// Default API root.
pub const RICK_AND_MORTY_API_BASE: &str = "https://rickandmortyapi.com/api";
const USER_AGENT: &str = concat!("rickdex/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Stateless gateway to the catalog API. Holds only the base URL and the
/// HTTP client, so it can be shared freely.
#[derive(Debug, Clone)]
pub struct RickAndMortyClient {
    client: Client,
    base_url: String,
}

impl RickAndMortyClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(RICK_AND_MORTY_API_BASE)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::build(base_url.into(), USER_AGENT, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates client from configuration.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        Self::build(config.base_url.clone(), user_agent, config.timeout_secs)
    }

    fn build(base_url: String, user_agent: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues `GET {base_url}/{endpoint}` and decodes the JSON body as `T`.
    ///
    /// # Errors
    /// Returns `Transport` when the request or body read fails, `Status` for
    /// non-2xx responses, `EmptyBody` when a successful response carries no
    /// data and `Decode` when the body does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let url = self.endpoint_url(endpoint);

        debug!(url = %url, "Fetching from API");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, url = %url, "Failed to reach API");
            if e.is_timeout() {
                FetchError::transport("request timed out")
            } else if e.is_connect() {
                FetchError::transport(format!("failed to connect: {e}"))
            } else {
                FetchError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        decode_body(&body).inspect_err(|e| {
            warn!(error = %e, url = %url, "Failed to decode API response");
        })
    }

    /// Fetches the first page of characters.
    ///
    /// # Errors
    /// See [`Self::fetch`].
    pub async fn fetch_all_characters(&self) -> Result<Page<Character>, FetchError> {
        self.fetch("character").await
    }

    /// Fetches one episode.
    ///
    /// # Errors
    /// See [`Self::fetch`].
    pub async fn fetch_episode(&self, id: EpisodeId) -> Result<Episode, FetchError> {
        self.fetch(&format!("episode/{id}")).await
    }

    /// Fetches several episodes with one comma-joined request. A single ID
    /// yields a bare object on the wire; both shapes come back as a sequence.
    /// An empty ID list makes no request.
    ///
    /// # Errors
    /// See [`Self::fetch`].
    pub async fn fetch_episodes(&self, ids: &[EpisodeId]) -> Result<Vec<Episode>, FetchError> {
        if ids.is_empty() {
            debug!("No episode IDs to fetch");
            return Ok(Vec::new());
        }

        let id_list = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let episodes: OneOrMany<Episode> = self.fetch(&format!("episode/{id_list}")).await?;
        Ok(episodes.into_vec())
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn status_error(status: StatusCode, body: &[u8]) -> FetchError {
        let message = serde_json::from_slice::<ErrorResponse>(body).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {}", status.as_u16()), String::from)
            },
            |error| error.error,
        );

        warn!(status = status.as_u16(), message = %message, "API returned error status");
        FetchError::status(status.as_u16(), message)
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyBody);
    }
    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
impl CatalogPort for RickAndMortyClient {
    async fn fetch_all_characters(&self) -> Result<Page<Character>, FetchError> {
        Self::fetch_all_characters(self).await
    }

    async fn fetch_episode(&self, id: EpisodeId) -> Result<Episode, FetchError> {
        Self::fetch_episode(self, id).await
    }

    async fn fetch_episodes(&self, ids: &[EpisodeId]) -> Result<Vec<Episode>, FetchError> {
        Self::fetch_episodes(self, ids).await
    }
}
