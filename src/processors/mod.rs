//! Event processors
//!
//! One processor per entity family; the registry routes each decoded event
//! to the processor that owns its effect. Events are applied strictly one
//! at a time (load, mutate in memory, persist) and never invoke each other;
//! all coordination happens through the shared entity store.

mod comptroller;
mod market;
mod membership;

pub use comptroller::ComptrollerProcessor;
pub use market::MarketProcessor;
pub use membership::MembershipProcessor;

use anyhow::Result;
use std::sync::Arc;

use crate::database::EntityStore;
use crate::events::{ComptrollerEvent, EventRecord};

/// Routes decoded comptroller events to their processors
pub struct ProcessorRegistry {
    market: MarketProcessor,
    membership: MembershipProcessor,
    comptroller: ComptrollerProcessor,
}

impl ProcessorRegistry {
    pub fn new(store: Arc<dyn EntityStore>, comptroller_id: String) -> Self {
        Self {
            market: MarketProcessor::new(store.clone()),
            membership: MembershipProcessor::new(store.clone()),
            comptroller: ComptrollerProcessor::new(store, comptroller_id),
        }
    }

    /// Apply one event's effect to the projected state.
    ///
    /// A returned error is fatal for this event only; whether to retry,
    /// skip or halt is the delivery layer's call.
    pub async fn process_event(&self, record: &EventRecord) -> Result<()> {
        use ComptrollerEvent::*;

        match &record.event {
            MarketListed { ctoken } => self.market.market_listed(*ctoken).await,
            MarketEntered { ctoken, account } => {
                self.membership
                    .market_entered(*ctoken, *account, &record.meta)
                    .await
            }
            MarketExited { ctoken, account } => {
                self.membership
                    .market_exited(*ctoken, *account, &record.meta)
                    .await
            }
            NewCloseFactor {
                new_close_factor_mantissa,
                ..
            } => {
                self.comptroller
                    .new_close_factor(*new_close_factor_mantissa)
                    .await
            }
            NewCollateralFactor {
                ctoken,
                new_collateral_factor_mantissa,
                ..
            } => {
                self.market
                    .new_collateral_factor(*ctoken, *new_collateral_factor_mantissa)
                    .await
            }
            NewLiquidationIncentive {
                new_liquidation_incentive_mantissa,
                ..
            } => {
                self.comptroller
                    .new_liquidation_incentive(*new_liquidation_incentive_mantissa)
                    .await
            }
            NewPriceOracle {
                new_price_oracle, ..
            } => self.comptroller.new_price_oracle(*new_price_oracle).await,
        }
    }
}
