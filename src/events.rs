//! Typed comptroller event records
//!
//! The decoding substrate hands the projector fully-typed, correctly-ordered
//! event records. Each record pairs the decoded log arguments with the
//! metadata every stats update stamps onto its entities.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Log metadata shared by every event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeta {
    pub transaction_hash: B256,
    /// Block timestamp in milliseconds
    pub timestamp_ms: i64,
    pub block_number: u64,
    pub log_index: u64,
}

/// Decoded comptroller log arguments, one variant per event signature
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComptrollerEvent {
    MarketListed {
        ctoken: Address,
    },
    MarketEntered {
        ctoken: Address,
        account: Address,
    },
    MarketExited {
        ctoken: Address,
        account: Address,
    },
    NewCloseFactor {
        old_close_factor_mantissa: U256,
        new_close_factor_mantissa: U256,
    },
    NewCollateralFactor {
        ctoken: Address,
        old_collateral_factor_mantissa: U256,
        new_collateral_factor_mantissa: U256,
    },
    NewLiquidationIncentive {
        old_liquidation_incentive_mantissa: U256,
        new_liquidation_incentive_mantissa: U256,
    },
    NewPriceOracle {
        old_price_oracle: Address,
        new_price_oracle: Address,
    },
}

impl ComptrollerEvent {
    /// Event name as emitted by the contract ABI
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MarketListed { .. } => "MarketListed",
            Self::MarketEntered { .. } => "MarketEntered",
            Self::MarketExited { .. } => "MarketExited",
            Self::NewCloseFactor { .. } => "NewCloseFactor",
            Self::NewCollateralFactor { .. } => "NewCollateralFactor",
            Self::NewLiquidationIncentive { .. } => "NewLiquidationIncentive",
            Self::NewPriceOracle { .. } => "NewPriceOracle",
        }
    }
}

/// One fully-decoded log, ready for projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub meta: EventMeta,
    pub event: ComptrollerEvent,
}
