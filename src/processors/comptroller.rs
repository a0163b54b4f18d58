//! Protocol-parameter updates on the comptroller singleton

use alloy_primitives::{Address, U256};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::database::EntityStore;
use crate::error::IndexerError;
use crate::mantissa::mantissa_to_u128;
use crate::models::Comptroller;

/// Processor for protocol-configuration events
pub struct ComptrollerProcessor {
    store: Arc<dyn EntityStore>,
    comptroller_id: String,
}

impl ComptrollerProcessor {
    pub fn new(store: Arc<dyn EntityStore>, comptroller_id: String) -> Self {
        Self {
            store,
            comptroller_id,
        }
    }

    /// Record a close-factor change. Assumes the comptroller record exists;
    /// if it does not, the event fails with a missing-entity error (see
    /// `new_price_oracle` for why the handlers differ here).
    pub async fn new_close_factor(&self, new_mantissa: U256) -> Result<()> {
        let mut comptroller = self.existing_comptroller().await?;
        comptroller.close_factor = Some(mantissa_to_u128(new_mantissa)?);
        self.store.save_comptroller(&comptroller).await
    }

    /// Record a liquidation-incentive change. Same existence assumption as
    /// `new_close_factor`.
    pub async fn new_liquidation_incentive(&self, new_mantissa: U256) -> Result<()> {
        let mut comptroller = self.existing_comptroller().await?;
        comptroller.liquidation_incentive = Some(mantissa_to_u128(new_mantissa)?);
        self.store.save_comptroller(&comptroller).await
    }

    /// Record a price-oracle change. On the chains this projector follows,
    /// the oracle event is the first comptroller event observed, so this is
    /// the one handler that creates the singleton when it is absent.
    pub async fn new_price_oracle(&self, new_oracle: Address) -> Result<()> {
        let mut comptroller = match self.store.get_comptroller(&self.comptroller_id).await? {
            Some(comptroller) => comptroller,
            None => {
                info!("creating comptroller record {}", self.comptroller_id);
                Comptroller::new(self.comptroller_id.clone())
            }
        };
        comptroller.price_oracle = Some(new_oracle.to_string());
        self.store.save_comptroller(&comptroller).await
    }

    async fn existing_comptroller(&self) -> Result<Comptroller> {
        let comptroller = self.store.get_comptroller(&self.comptroller_id).await?;
        Ok(comptroller.ok_or_else(|| IndexerError::MissingEntity {
            entity: "Comptroller",
            id: self.comptroller_id.clone(),
        })?)
    }
}
