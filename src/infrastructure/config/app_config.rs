//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use super::storage::ConfigError;
use crate::infrastructure::api::RICK_AND_MORTY_API_BASE;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overlaid by CLI
/// arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// API client configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image cache configuration.
    #[serde(default)]
    pub images: ImageConfig,
}

/// API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://rickandmortyapi.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Image cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Maximum decoded images kept in memory.
    #[serde(default = "default_memory_cache_size")]
    pub memory_cache_size: usize,

    /// Maximum concurrent downloads for background loads.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,

    /// Download timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: default_memory_cache_size(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    RICK_AND_MORTY_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_memory_cache_size() -> usize {
    100
}

fn default_max_concurrent_downloads() -> usize {
    4
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.api.timeout_secs = timeout_secs;
            self.images.timeout_secs = timeout_secs;
        }
        if let Some(cache_size) = args.cache_size {
            self.images.memory_cache_size = cache_size;
        }
    }

    /// Checks values that would otherwise fail late.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::invalid(
                    "api.base_url",
                    format!("unsupported URL scheme: {}", url.scheme()),
                ));
            }
            Err(e) => {
                return Err(ConfigError::invalid(
                    "api.base_url",
                    format!("invalid URL: {e}"),
                ));
            }
        }

        if self.images.memory_cache_size == 0 {
            return Err(ConfigError::invalid(
                "images.memory_cache_size",
                "must be at least 1",
            ));
        }
        if self.images.max_concurrent_downloads == 0 {
            return Err(ConfigError::invalid(
                "images.max_concurrent_downloads",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            images: ImageConfig::default(),
        }
    }
}
