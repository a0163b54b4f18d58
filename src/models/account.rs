//! Account and per-market participation entities

use serde::{Deserialize, Serialize};

/// Minimal identity record for an address interacting with the protocol.
/// Created lazily the first time any membership event references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
}

/// Per-account, per-market participation statistics.
///
/// Uniquely identified by the (market, account) pair; many records per
/// market, many per account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CTokenStats {
    pub id: String,
    pub market: String,
    pub symbol: String,
    pub account: String,
    pub entered_market: bool,
    pub last_transaction_hash: String,
    /// Block timestamp of the last update, in milliseconds
    pub last_update_timestamp: i64,
    pub last_update_block: u64,
    pub last_update_log_index: u64,
}

impl CTokenStats {
    /// Composite key for a (market, account) pair
    pub fn stats_id(market_id: &str, account_id: &str) -> String {
        format!("{market_id}-{account_id}")
    }
}
