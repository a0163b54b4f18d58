//! Market entry/exit and per-account statistics

use alloy_primitives::Address;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::database::EntityStore;
use crate::events::EventMeta;
use crate::models::{Account, CTokenStats};

/// Processor for account membership events
pub struct MembershipProcessor {
    store: Arc<dyn EntityStore>,
}

impl MembershipProcessor {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// An account started using a market as collateral.
    pub async fn market_entered(
        &self,
        ctoken: Address,
        account: Address,
        meta: &EventMeta,
    ) -> Result<()> {
        self.set_membership(ctoken, account, meta, true).await
    }

    /// An account stopped using a market as collateral.
    pub async fn market_exited(
        &self,
        ctoken: Address,
        account: Address,
        meta: &EventMeta,
    ) -> Result<()> {
        self.set_membership(ctoken, account, meta, false).await
    }

    async fn set_membership(
        &self,
        ctoken: Address,
        account: Address,
        meta: &EventMeta,
        entered: bool,
    ) -> Result<()> {
        let market_id = ctoken.to_string();
        // Membership events can precede the listing event; a stats record
        // pointing at a market that does not exist is worse than a dropped
        // update, so skip until the market shows up.
        let Some(market) = self.store.get_market(&market_id).await? else {
            debug!("membership change on unlisted market {market_id}, skipping");
            return Ok(());
        };

        let account_id = account.to_string();
        self.ensure_account(&account_id).await?;

        let mut stats = self
            .update_common_stats(&market.id, &market.symbol, &account_id, meta)
            .await?;
        stats.entered_market = entered;
        self.store.save_stats(&stats).await
    }

    /// Guarantee an `Account` record exists for the address.
    pub async fn ensure_account(&self, account_id: &str) -> Result<()> {
        if self.store.get_account(account_id).await?.is_none() {
            self.store
                .save_account(&Account {
                    id: account_id.to_string(),
                })
                .await?;
        }
        Ok(())
    }

    /// Fetch or create the stats record for a (market, account) pair and
    /// stamp the activity metadata onto it.
    ///
    /// The record is returned unsaved: the caller sets the event-specific
    /// fields and persists, so the entry and exit paths share this logic
    /// without it deciding their semantics. `entered_market` is left
    /// untouched on existing records.
    pub async fn update_common_stats(
        &self,
        market_id: &str,
        market_symbol: &str,
        account_id: &str,
        meta: &EventMeta,
    ) -> Result<CTokenStats> {
        let id = CTokenStats::stats_id(market_id, account_id);
        let mut stats = match self.store.get_stats(&id).await? {
            Some(stats) => stats,
            None => CTokenStats {
                id,
                market: market_id.to_string(),
                symbol: market_symbol.to_string(),
                account: account_id.to_string(),
                entered_market: false,
                last_transaction_hash: String::new(),
                last_update_timestamp: 0,
                last_update_block: 0,
                last_update_log_index: 0,
            },
        };

        stats.last_transaction_hash = meta.transaction_hash.to_string();
        stats.last_update_timestamp = meta.timestamp_ms;
        stats.last_update_block = meta.block_number;
        stats.last_update_log_index = meta.log_index;

        Ok(stats)
    }
}
