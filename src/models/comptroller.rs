//! Singleton protocol configuration record

use serde::{Deserialize, Serialize};

/// Well-known identifier of the comptroller record. The effective id is a
/// configuration value; this is only its default.
pub const DEFAULT_COMPTROLLER_ID: &str = "1";

/// Protocol-wide configuration projected from comptroller parameter events.
///
/// No single event is guaranteed to be observed first, so the record is
/// created lazily and every field stays optional until its event arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comptroller {
    pub id: String,
    /// Raw integer-scaled close factor mantissa
    pub close_factor: Option<u128>,
    /// Raw integer-scaled liquidation incentive mantissa
    pub liquidation_incentive: Option<u128>,
    pub price_oracle: Option<String>,
}

impl Comptroller {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            close_factor: None,
            liquidation_incentive: None,
            price_oracle: None,
        }
    }
}
