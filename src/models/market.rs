//! Market entities

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder decimal count until token metadata is resolved externally
pub const DEFAULT_UNDERLYING_DECIMALS: i32 = 18;

/// Marker record written once when a market is listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CToken {
    pub id: String,
    pub ctoken: String,
}

impl CToken {
    pub fn new(address: Address) -> Self {
        let id = address.to_string();
        Self {
            ctoken: id.clone(),
            id,
        }
    }
}

/// Projected state of one lending market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub underlying_address: String,
    pub underlying_decimals: i32,
    pub underlying_name: String,
    pub underlying_symbol: String,
    pub underlying_price_usd: Decimal,
    pub borrow_rate: Decimal,
    pub cash: Decimal,
    pub collateral_factor: Decimal,
    pub exchange_rate: Decimal,
    pub interest_rate_model_address: String,
    pub name: String,
    pub reserves: Decimal,
    pub supply_rate: Decimal,
    pub symbol: String,
    pub total_borrows: Decimal,
    pub total_supply: Decimal,
    pub borrow_index: Decimal,
    pub reserve_factor: Decimal,
    pub accrual_block_number: u64,
    pub block_timestamp: i64,
}

impl Market {
    /// Build a freshly-listed market.
    ///
    /// Token metadata (decimals, names, the interest rate model) comes from
    /// a separate refinement pass against the live contracts; until that
    /// runs, the market's own address stands in for the identity fields,
    /// every rate is zero, and the underlying is assumed to use the
    /// standard 18 decimals. The record is structurally valid and
    /// query-safe from the moment it is saved.
    pub fn new(address: Address) -> Self {
        let id = address.to_string();
        Self {
            underlying_address: id.clone(),
            underlying_decimals: DEFAULT_UNDERLYING_DECIMALS,
            underlying_name: id.clone(),
            underlying_symbol: id.clone(),
            underlying_price_usd: Decimal::ZERO,
            borrow_rate: Decimal::ZERO,
            cash: Decimal::ZERO,
            collateral_factor: Decimal::ZERO,
            exchange_rate: Decimal::ZERO,
            interest_rate_model_address: Address::ZERO.to_string(),
            name: id.clone(),
            reserves: Decimal::ZERO,
            supply_rate: Decimal::ZERO,
            symbol: id.clone(),
            total_borrows: Decimal::ZERO,
            total_supply: Decimal::ZERO,
            borrow_index: Decimal::ZERO,
            reserve_factor: Decimal::ZERO,
            accrual_block_number: 0,
            block_timestamp: 0,
            id,
        }
    }
}
