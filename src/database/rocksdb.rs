//! RocksDB-backed entity store

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::info;

use super::EntityStore;
use crate::config::RocksDbConfig;
use crate::models::{Account, CToken, CTokenStats, Comptroller, Market};

/// Type alias for the RocksDB instance
pub type RocksDb = DBWithThreadMode<MultiThreaded>;

/// Column family names, one per entity kind
pub struct ColumnFamilies;

impl ColumnFamilies {
    pub const MARKETS: &'static str = "markets";
    pub const CTOKENS: &'static str = "ctokens";
    pub const ACCOUNTS: &'static str = "accounts";
    pub const ACCOUNT_CTOKENS: &'static str = "account_ctokens";
    pub const COMPTROLLER: &'static str = "comptroller";

    /// Get all column family names
    pub fn all() -> Vec<&'static str> {
        vec![
            Self::MARKETS,
            Self::CTOKENS,
            Self::ACCOUNTS,
            Self::ACCOUNT_CTOKENS,
            Self::COMPTROLLER,
        ]
    }
}

/// Entity store persisting bincode-encoded records, one column family per
/// entity kind
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<RocksDb>,
}

impl RocksDbStore {
    /// Open (or create) the database at the configured path
    pub fn open(config: &RocksDbConfig) -> Result<Self> {
        info!("Opening RocksDB at {}", config.path.display());

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_open_files(config.max_open_files);
        db_opts.set_write_buffer_size(config.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_write_buffer_number(config.max_write_buffer_number);

        if config.enable_compression {
            db_opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        }

        let cache = rocksdb::Cache::new_lru_cache(config.block_cache_size_mb * 1024 * 1024);
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_block_cache(&cache);
        db_opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = ColumnFamilies::all()
            .into_iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                if config.enable_compression {
                    cf_opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
                }
                ColumnFamilyDescriptor::new(name, cf_opts)
            })
            .collect();

        let db = RocksDb::open_cf_descriptors(&db_opts, &config.path, cf_descriptors)
            .map_err(|e| anyhow!("failed to open RocksDB: {e}"))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<Arc<rocksdb::BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| anyhow!("column family '{name}' not found"))
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let encoded = bincode::serialize(value)?;
        self.db
            .put_cf(&cf, key.as_bytes(), encoded)
            .map_err(|e| anyhow!("failed to put {cf_name}/{key}: {e}"))
    }

    fn get<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(&cf, key.as_bytes()) {
            Ok(Some(data)) => Ok(Some(bincode::deserialize(&data)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(anyhow!("failed to get {cf_name}/{key}: {e}")),
        }
    }
}

#[async_trait]
impl EntityStore for RocksDbStore {
    async fn get_market(&self, id: &str) -> Result<Option<Market>> {
        self.get(ColumnFamilies::MARKETS, id)
    }

    async fn save_market(&self, market: &Market) -> Result<()> {
        self.put(ColumnFamilies::MARKETS, &market.id, market)
    }

    async fn get_ctoken(&self, id: &str) -> Result<Option<CToken>> {
        self.get(ColumnFamilies::CTOKENS, id)
    }

    async fn save_ctoken(&self, ctoken: &CToken) -> Result<()> {
        self.put(ColumnFamilies::CTOKENS, &ctoken.id, ctoken)
    }

    async fn get_account(&self, id: &str) -> Result<Option<Account>> {
        self.get(ColumnFamilies::ACCOUNTS, id)
    }

    async fn save_account(&self, account: &Account) -> Result<()> {
        self.put(ColumnFamilies::ACCOUNTS, &account.id, account)
    }

    async fn get_stats(&self, id: &str) -> Result<Option<CTokenStats>> {
        self.get(ColumnFamilies::ACCOUNT_CTOKENS, id)
    }

    async fn save_stats(&self, stats: &CTokenStats) -> Result<()> {
        self.put(ColumnFamilies::ACCOUNT_CTOKENS, &stats.id, stats)
    }

    async fn get_comptroller(&self, id: &str) -> Result<Option<Comptroller>> {
        self.get(ColumnFamilies::COMPTROLLER, id)
    }

    async fn save_comptroller(&self, comptroller: &Comptroller) -> Result<()> {
        self.put(ColumnFamilies::COMPTROLLER, &comptroller.id, comptroller)
    }
}
