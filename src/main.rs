//! Comptroller event indexer
//!
//! Replays a decoded comptroller event stream and projects lending-market
//! state into RocksDB for querying.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ctoken_indexer::config::IndexerConfig;
use ctoken_indexer::database::RocksDbStore;
use ctoken_indexer::feed::{self, JsonlFeed};
use ctoken_indexer::processors::ProcessorRegistry;

#[derive(Parser)]
#[command(name = "ctoken-indexer")]
#[command(about = "Comptroller event indexer")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "indexer.toml")]
    config: String,

    /// Event feed path, overriding the configured one
    #[arg(long)]
    events: Option<PathBuf>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Validate configuration and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_missing = !std::path::Path::new(&cli.config).exists();
    let mut config = if config_missing {
        IndexerConfig::default()
    } else {
        IndexerConfig::from_file(&cli.config)?
    };

    if let Some(log_level) = cli.log_level {
        config.monitoring.log_level = log_level;
    }
    if let Some(events) = cli.events {
        config.feed.events_path = events;
    }

    init_logging(&config)?;
    if config_missing {
        warn!("Config file not found, using defaults: {}", cli.config);
    }

    info!("Starting comptroller indexer");
    info!("Event feed: {}", config.feed.events_path.display());
    info!("RocksDB path: {}", config.storage.rocksdb.path.display());

    config.validate()?;
    config.ensure_directories()?;

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let store = Arc::new(RocksDbStore::open(&config.storage.rocksdb)?);
    let registry = ProcessorRegistry::new(store, config.indexer.comptroller_id.clone());
    let source = JsonlFeed::open(&config.feed.events_path)?;

    tokio::select! {
        result = feed::consume(source, &registry) => {
            let stats = result?;
            info!("replay complete: {} processed, {} failed", stats.processed, stats.failed);
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}

fn init_logging(config: &IndexerConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ctoken_indexer={}", config.monitoring.log_level).into());

    if config.monitoring.structured_logging {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Ok(())
}
