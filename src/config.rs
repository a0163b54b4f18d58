//! Configuration for the indexer binary

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::models::comptroller::DEFAULT_COMPTROLLER_ID;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexerConfig {
    pub feed: FeedConfig,
    pub storage: StorageConfig,
    pub monitoring: MonitoringConfig,
    pub indexer: IndexerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// NDJSON file of decoded event records, in on-chain order
    pub events_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub rocksdb: RocksDbConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RocksDbConfig {
    pub path: PathBuf,
    pub enable_compression: bool,
    #[validate(range(min = 100, max = 10000))]
    pub max_open_files: i32,
    #[validate(range(min = 16, max = 2048))]
    pub write_buffer_size_mb: usize,
    #[validate(range(min = 2, max = 16))]
    pub max_write_buffer_number: i32,
    #[validate(range(min = 32, max = 4096))]
    pub block_cache_size_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub structured_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IndexerSettings {
    /// Well-known id of the singleton comptroller record
    #[validate(length(min = 1))]
    pub comptroller_id: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            events_path: "./data/events.ndjson".into(),
        }
    }
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".into(),
            enable_compression: true,
            max_open_files: 1000,
            write_buffer_size_mb: 64,
            max_write_buffer_number: 4,
            block_cache_size_mb: 256,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl Default for IndexerSettings {
    fn default() -> Self {
        Self {
            comptroller_id: DEFAULT_COMPTROLLER_ID.to_string(),
        }
    }
}

impl IndexerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(&self.storage.rocksdb)?;
        Validate::validate(&self.indexer)?;
        if self.feed.events_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("event feed path cannot be empty"));
        }
        Ok(())
    }

    /// Ensure required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.storage.rocksdb.path)?;
        Ok(())
    }
}
