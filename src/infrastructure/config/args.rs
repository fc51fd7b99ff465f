use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments. Set values override `config.toml`.
#[derive(Debug, Parser)]
#[command(
    name = "rickdex",
    version,
    about = "Browse Rick and Morty characters and their episodes",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// API root URL.
    #[arg(long, env = "RICKDEX_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum decoded images kept in memory.
    #[arg(long)]
    pub cache_size: Option<usize>,

    /// Show the episodes of the character with this ID.
    #[arg(long, value_name = "ID")]
    pub character: Option<u32>,

    /// Download every character thumbnail into the image cache.
    #[arg(long)]
    pub prefetch_images: bool,
}
