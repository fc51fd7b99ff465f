use std::collections::HashSet;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rickdex::application::{CharacterDetailPresenter, CharacterListPresenter, EpisodeResolver};
use rickdex::domain::entities::{CharacterId, ImageKey};
use rickdex::domain::ports::{CatalogPort, CharacterListView, EpisodeListView};
use rickdex::infrastructure::{
    AppConfig, CliArgs, ConfigError, ImageLoadedEvent, ImageLoader, RickAndMortyClient,
    StorageManager,
};
use rickdex::presentation::ConsoleView;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match StorageManager::new() {
        Ok(storage) => storage.load_config(args.config.as_deref())?,
        Err(ConfigError::ConfigDirNotFound) => AppConfig::default(),
        Err(e) => return Err(e.into()),
    };

    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}

async fn prefetch_images(
    images: &ImageLoader,
    urls: Vec<String>,
    events: &mut mpsc::UnboundedReceiver<ImageLoadedEvent>,
) {
    let total = urls.len();
    images.prefetch_batch(urls);

    let mut loaded = 0;
    for _ in 0..total {
        match events.recv().await {
            Some(event) if event.result.is_some() => loaded += 1,
            Some(event) => warn!(key = %event.key, "Thumbnail unavailable"),
            None => break,
        }
    }

    println!("Cached {loaded}/{total} thumbnails ({})", images.memory_cache_stats());
}

async fn run(config: AppConfig, args: CliArgs) -> Result<()> {
    let catalog: Arc<dyn CatalogPort> = Arc::new(RickAndMortyClient::from_config(&config.api)?);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let images = Arc::new(ImageLoader::with_http(config.images.clone(), &event_tx)?);

    let console = Arc::new(ConsoleView::stdout());
    let list_view: Arc<dyn CharacterListView> = console.clone();
    let list = CharacterListPresenter::new(&list_view, Arc::clone(&catalog), images.clone());

    list.fetch_characters().await?;

    let characters = console.shown_characters();
    if characters.is_empty() {
        return Ok(());
    }

    if let Some(id) = args.character {
        let character = console
            .select(CharacterId(id))
            .ok_or_else(|| eyre!("character {id} is not on the first page"))?;

        println!();
        println!("Episodes featuring {}:", character.name());

        let episode_view: Arc<dyn EpisodeListView> = console.clone();
        let detail = CharacterDetailPresenter::new(
            character,
            &episode_view,
            EpisodeResolver::new(Arc::clone(&catalog)),
        );
        detail.fetch_episodes().await?;
    }

    if args.prefetch_images {
        let mut seen = HashSet::new();
        let urls = characters
            .iter()
            .map(|c| c.image().to_string())
            .filter(|url| !url.is_empty() && seen.insert(ImageKey::from_url(url)))
            .collect();
        prefetch_images(&images, urls, &mut event_rx).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(
        version = rickdex::VERSION,
        base_url = %config.api.base_url,
        "Starting {}",
        rickdex::NAME
    );

    run(config, args).await
}
