//! Entity store layer
//!
//! All projected entities live behind [`EntityStore`]: typed get/save with
//! upsert semantics, durable once the save returns. Two implementations:
//! RocksDB for the indexer binary, and an in-memory map for tests and dry
//! runs.

pub mod memory;
pub mod rocksdb;

pub use memory::MemoryStore;
pub use rocksdb::{ColumnFamilies, RocksDbStore};

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Account, CToken, CTokenStats, Comptroller, Market};

/// Keyed entity storage with upsert semantics
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_market(&self, id: &str) -> Result<Option<Market>>;
    async fn save_market(&self, market: &Market) -> Result<()>;

    async fn get_ctoken(&self, id: &str) -> Result<Option<CToken>>;
    async fn save_ctoken(&self, ctoken: &CToken) -> Result<()>;

    async fn get_account(&self, id: &str) -> Result<Option<Account>>;
    async fn save_account(&self, account: &Account) -> Result<()>;

    async fn get_stats(&self, id: &str) -> Result<Option<CTokenStats>>;
    async fn save_stats(&self, stats: &CTokenStats) -> Result<()>;

    async fn get_comptroller(&self, id: &str) -> Result<Option<Comptroller>>;
    async fn save_comptroller(&self, comptroller: &Comptroller) -> Result<()>;
}
