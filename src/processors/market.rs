//! Market listing and collateral-factor updates

use alloy_primitives::{Address, U256};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::database::EntityStore;
use crate::mantissa::mantissa_to_decimal;
use crate::models::{CToken, Market};

/// Processor for market-level comptroller events
pub struct MarketProcessor {
    store: Arc<dyn EntityStore>,
}

impl MarketProcessor {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// A market was listed on the comptroller. Canonical creation point for
    /// the `Market` entity: writes the marker record and a fully-seeded
    /// market in one pass.
    pub async fn market_listed(&self, ctoken: Address) -> Result<()> {
        info!("market listed: {ctoken}");
        self.store.save_ctoken(&CToken::new(ctoken)).await?;
        self.store.save_market(&Market::new(ctoken)).await?;
        Ok(())
    }

    /// Apply a collateral-factor change to a listed market.
    pub async fn new_collateral_factor(&self, ctoken: Address, new_mantissa: U256) -> Result<()> {
        let id = ctoken.to_string();
        // Listing and registration events can arrive in either order; an
        // unknown market has simply not been listed from our view yet.
        let Some(mut market) = self.store.get_market(&id).await? else {
            debug!("collateral factor for unlisted market {id}, skipping");
            return Ok(());
        };
        market.collateral_factor = mantissa_to_decimal(new_mantissa)?;
        self.store.save_market(&market).await
    }
}
