//! In-memory entity store for tests and dry runs

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::EntityStore;
use crate::models::{Account, CToken, CTokenStats, Comptroller, Market};

/// Map-backed store with the same upsert semantics as the RocksDB store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    markets: HashMap<String, Market>,
    ctokens: HashMap<String, CToken>,
    accounts: HashMap<String, Account>,
    stats: HashMap<String, CTokenStats>,
    comptrollers: HashMap<String, Comptroller>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| anyhow!("store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| anyhow!("store lock poisoned"))
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_market(&self, id: &str) -> Result<Option<Market>> {
        Ok(self.read()?.markets.get(id).cloned())
    }

    async fn save_market(&self, market: &Market) -> Result<()> {
        self.write()?.markets.insert(market.id.clone(), market.clone());
        Ok(())
    }

    async fn get_ctoken(&self, id: &str) -> Result<Option<CToken>> {
        Ok(self.read()?.ctokens.get(id).cloned())
    }

    async fn save_ctoken(&self, ctoken: &CToken) -> Result<()> {
        self.write()?.ctokens.insert(ctoken.id.clone(), ctoken.clone());
        Ok(())
    }

    async fn get_account(&self, id: &str) -> Result<Option<Account>> {
        Ok(self.read()?.accounts.get(id).cloned())
    }

    async fn save_account(&self, account: &Account) -> Result<()> {
        self.write()?.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_stats(&self, id: &str) -> Result<Option<CTokenStats>> {
        Ok(self.read()?.stats.get(id).cloned())
    }

    async fn save_stats(&self, stats: &CTokenStats) -> Result<()> {
        self.write()?.stats.insert(stats.id.clone(), stats.clone());
        Ok(())
    }

    async fn get_comptroller(&self, id: &str) -> Result<Option<Comptroller>> {
        Ok(self.read()?.comptrollers.get(id).cloned())
    }

    async fn save_comptroller(&self, comptroller: &Comptroller) -> Result<()> {
        self.write()?
            .comptrollers
            .insert(comptroller.id.clone(), comptroller.clone());
        Ok(())
    }
}
