//! Application configuration.

/// Configuration model.
pub mod app_config;
/// Command line arguments.
pub mod args;
/// Config file persistence.
pub mod storage;

pub use app_config::{ApiConfig, AppConfig, ImageConfig, LogLevel};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
