//! Projection behavior tests against the in-memory store

use alloy_primitives::{Address, B256, U256};
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use ctoken_indexer::database::{EntityStore, MemoryStore};
use ctoken_indexer::error::IndexerError;
use ctoken_indexer::events::{ComptrollerEvent, EventMeta, EventRecord};
use ctoken_indexer::models::Market;
use ctoken_indexer::processors::ProcessorRegistry;

const MARKET: Address = Address::repeat_byte(0x11);
const OTHER_MARKET: Address = Address::repeat_byte(0x22);
const ALICE: Address = Address::repeat_byte(0xaa);
const ORACLE: Address = Address::repeat_byte(0x0f);

fn setup() -> (Arc<MemoryStore>, ProcessorRegistry) {
    let store = Arc::new(MemoryStore::new());
    let registry = ProcessorRegistry::new(store.clone(), "1".to_string());
    (store, registry)
}

fn meta(block: u64, log_index: u64) -> EventMeta {
    EventMeta {
        transaction_hash: B256::repeat_byte(block as u8),
        timestamp_ms: 1_700_000_000_000 + block as i64 * 12_000,
        block_number: block,
        log_index,
    }
}

async fn apply(
    registry: &ProcessorRegistry,
    event: ComptrollerEvent,
    block: u64,
    log_index: u64,
) -> Result<()> {
    registry
        .process_event(&EventRecord {
            meta: meta(block, log_index),
            event,
        })
        .await
}

fn mantissa(value: u128) -> U256 {
    U256::from(value)
}

#[test]
fn market_factory_seeds_placeholder_record() {
    let market = Market::new(MARKET);
    let id = MARKET.to_string();

    assert_eq!(market.id, id);
    assert_eq!(market.underlying_decimals, 18);
    assert_eq!(market.underlying_address, id);
    assert_eq!(market.underlying_name, id);
    assert_eq!(market.underlying_symbol, id);
    assert_eq!(market.name, id);
    assert_eq!(market.symbol, id);
    assert_eq!(market.interest_rate_model_address, Address::ZERO.to_string());
    assert_eq!(market.accrual_block_number, 0);
    assert_eq!(market.block_timestamp, 0);

    for value in [
        market.underlying_price_usd,
        market.borrow_rate,
        market.cash,
        market.collateral_factor,
        market.exchange_rate,
        market.reserves,
        market.supply_rate,
        market.total_borrows,
        market.total_supply,
        market.borrow_index,
        market.reserve_factor,
    ] {
        assert_eq!(value, Decimal::ZERO);
    }
}

#[tokio::test]
async fn listing_creates_market_and_marker() -> Result<()> {
    let (store, registry) = setup();

    apply(&registry, ComptrollerEvent::MarketListed { ctoken: MARKET }, 1, 0).await?;

    let id = MARKET.to_string();
    let ctoken = store.get_ctoken(&id).await?.expect("marker record");
    assert_eq!(ctoken.ctoken, id);

    let market = store.get_market(&id).await?.expect("market record");
    assert_eq!(market.collateral_factor, Decimal::ZERO);
    Ok(())
}

#[tokio::test]
async fn entering_market_sets_flag_and_creates_account() -> Result<()> {
    let (store, registry) = setup();

    apply(&registry, ComptrollerEvent::MarketListed { ctoken: MARKET }, 1, 0).await?;
    apply(
        &registry,
        ComptrollerEvent::MarketEntered {
            ctoken: MARKET,
            account: ALICE,
        },
        2,
        3,
    )
    .await?;

    let stats_id = format!("{}-{}", MARKET, ALICE);
    let stats = store.get_stats(&stats_id).await?.expect("stats record");
    assert!(stats.entered_market);
    assert_eq!(stats.market, MARKET.to_string());
    assert_eq!(stats.account, ALICE.to_string());
    assert_eq!(stats.last_update_block, 2);
    assert_eq!(stats.last_update_log_index, 3);

    assert!(store.get_account(&ALICE.to_string()).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn reentering_market_is_idempotent_and_refreshes_metadata() -> Result<()> {
    let (store, registry) = setup();
    let entered = ComptrollerEvent::MarketEntered {
        ctoken: MARKET,
        account: ALICE,
    };

    apply(&registry, ComptrollerEvent::MarketListed { ctoken: MARKET }, 1, 0).await?;
    apply(&registry, entered.clone(), 10, 1).await?;
    apply(&registry, entered, 20, 7).await?;

    let stats_id = format!("{}-{}", MARKET, ALICE);
    let stats = store.get_stats(&stats_id).await?.expect("stats record");
    assert!(stats.entered_market);
    assert_eq!(stats.last_update_block, 20);
    assert_eq!(stats.last_update_log_index, 7);
    assert_eq!(stats.last_transaction_hash, B256::repeat_byte(20).to_string());
    assert_eq!(stats.last_update_timestamp, meta(20, 7).timestamp_ms);
    Ok(())
}

#[tokio::test]
async fn entering_unlisted_market_is_skipped() -> Result<()> {
    let (store, registry) = setup();

    apply(
        &registry,
        ComptrollerEvent::MarketEntered {
            ctoken: MARKET,
            account: ALICE,
        },
        5,
        0,
    )
    .await?;

    let stats_id = format!("{}-{}", MARKET, ALICE);
    assert!(store.get_stats(&stats_id).await?.is_none());
    assert!(store.get_account(&ALICE.to_string()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn enter_then_exit_toggles_membership() -> Result<()> {
    let (store, registry) = setup();
    let exited = ComptrollerEvent::MarketExited {
        ctoken: MARKET,
        account: ALICE,
    };

    apply(&registry, ComptrollerEvent::MarketListed { ctoken: MARKET }, 1, 0).await?;
    apply(
        &registry,
        ComptrollerEvent::MarketEntered {
            ctoken: MARKET,
            account: ALICE,
        },
        2,
        0,
    )
    .await?;
    apply(&registry, exited.clone(), 3, 0).await?;

    let stats_id = format!("{}-{}", MARKET, ALICE);
    let stats = store.get_stats(&stats_id).await?.expect("stats record");
    assert!(!stats.entered_market);

    // Repeating the exit changes nothing but the activity metadata
    apply(&registry, exited, 4, 2).await?;
    let stats = store.get_stats(&stats_id).await?.expect("stats record");
    assert!(!stats.entered_market);
    assert_eq!(stats.last_update_block, 4);
    Ok(())
}

#[tokio::test]
async fn exit_before_listing_is_skipped() -> Result<()> {
    let (store, registry) = setup();

    apply(
        &registry,
        ComptrollerEvent::MarketExited {
            ctoken: OTHER_MARKET,
            account: ALICE,
        },
        2,
        0,
    )
    .await?;

    let stats_id = format!("{}-{}", OTHER_MARKET, ALICE);
    assert!(store.get_stats(&stats_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn price_oracle_lazily_creates_comptroller() -> Result<()> {
    let (store, registry) = setup();

    apply(
        &registry,
        ComptrollerEvent::NewPriceOracle {
            old_price_oracle: Address::ZERO,
            new_price_oracle: ORACLE,
        },
        1,
        0,
    )
    .await?;

    let comptroller = store.get_comptroller("1").await?.expect("comptroller");
    assert_eq!(comptroller.price_oracle, Some(ORACLE.to_string()));
    assert_eq!(comptroller.close_factor, None);
    assert_eq!(comptroller.liquidation_incentive, None);

    apply(
        &registry,
        ComptrollerEvent::NewCloseFactor {
            old_close_factor_mantissa: U256::ZERO,
            new_close_factor_mantissa: mantissa(500_000_000_000_000_000),
        },
        2,
        0,
    )
    .await?;
    // A later oracle change touches only the oracle field
    apply(
        &registry,
        ComptrollerEvent::NewPriceOracle {
            old_price_oracle: ORACLE,
            new_price_oracle: OTHER_MARKET,
        },
        3,
        0,
    )
    .await?;

    let comptroller = store.get_comptroller("1").await?.expect("comptroller");
    assert_eq!(comptroller.price_oracle, Some(OTHER_MARKET.to_string()));
    assert_eq!(comptroller.close_factor, Some(500_000_000_000_000_000));
    Ok(())
}

#[tokio::test]
async fn close_factor_without_comptroller_fails() -> Result<()> {
    let (store, registry) = setup();

    let err = apply(
        &registry,
        ComptrollerEvent::NewCloseFactor {
            old_close_factor_mantissa: U256::ZERO,
            new_close_factor_mantissa: mantissa(500_000_000_000_000_000),
        },
        1,
        0,
    )
    .await
    .expect_err("close factor must require an existing comptroller");

    assert!(matches!(
        err.downcast_ref::<IndexerError>(),
        Some(IndexerError::MissingEntity { entity: "Comptroller", .. })
    ));
    assert!(store.get_comptroller("1").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn liquidation_incentive_without_comptroller_fails() -> Result<()> {
    let (_store, registry) = setup();

    let err = apply(
        &registry,
        ComptrollerEvent::NewLiquidationIncentive {
            old_liquidation_incentive_mantissa: U256::ZERO,
            new_liquidation_incentive_mantissa: mantissa(1_080_000_000_000_000_000),
        },
        1,
        0,
    )
    .await
    .expect_err("liquidation incentive must require an existing comptroller");

    assert!(err.downcast_ref::<IndexerError>().is_some());
    Ok(())
}

#[tokio::test]
async fn liquidation_incentive_stores_raw_mantissa() -> Result<()> {
    let (store, registry) = setup();

    apply(
        &registry,
        ComptrollerEvent::NewPriceOracle {
            old_price_oracle: Address::ZERO,
            new_price_oracle: ORACLE,
        },
        1,
        0,
    )
    .await?;
    apply(
        &registry,
        ComptrollerEvent::NewLiquidationIncentive {
            old_liquidation_incentive_mantissa: U256::ZERO,
            new_liquidation_incentive_mantissa: mantissa(1_080_000_000_000_000_000),
        },
        2,
        0,
    )
    .await?;

    let comptroller = store.get_comptroller("1").await?.expect("comptroller");
    assert_eq!(
        comptroller.liquidation_incentive,
        Some(1_080_000_000_000_000_000)
    );
    Ok(())
}

#[tokio::test]
async fn collateral_factor_scales_mantissa() -> Result<()> {
    let (store, registry) = setup();

    apply(&registry, ComptrollerEvent::MarketListed { ctoken: MARKET }, 1, 0).await?;
    apply(
        &registry,
        ComptrollerEvent::NewCollateralFactor {
            ctoken: MARKET,
            old_collateral_factor_mantissa: U256::ZERO,
            new_collateral_factor_mantissa: mantissa(2_500_000_000_000_000_000),
        },
        2,
        0,
    )
    .await?;

    let market = store.get_market(&MARKET.to_string()).await?.expect("market");
    assert_eq!(market.collateral_factor, dec!(2.5));
    Ok(())
}

#[tokio::test]
async fn collateral_factor_for_unlisted_market_is_skipped() -> Result<()> {
    let (store, registry) = setup();

    apply(
        &registry,
        ComptrollerEvent::NewCollateralFactor {
            ctoken: MARKET,
            old_collateral_factor_mantissa: U256::ZERO,
            new_collateral_factor_mantissa: mantissa(2_500_000_000_000_000_000),
        },
        2,
        0,
    )
    .await?;

    assert!(store.get_market(&MARKET.to_string()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn end_to_end_scenario() -> Result<()> {
    let (store, registry) = setup();

    apply(&registry, ComptrollerEvent::MarketListed { ctoken: MARKET }, 1, 0).await?;
    apply(
        &registry,
        ComptrollerEvent::NewPriceOracle {
            old_price_oracle: Address::ZERO,
            new_price_oracle: ORACLE,
        },
        2,
        0,
    )
    .await?;
    apply(
        &registry,
        ComptrollerEvent::MarketEntered {
            ctoken: MARKET,
            account: ALICE,
        },
        3,
        0,
    )
    .await?;
    apply(
        &registry,
        ComptrollerEvent::NewCollateralFactor {
            ctoken: MARKET,
            old_collateral_factor_mantissa: U256::ZERO,
            new_collateral_factor_mantissa: mantissa(500_000_000_000_000_000),
        },
        4,
        0,
    )
    .await?;

    let market = store.get_market(&MARKET.to_string()).await?.expect("market");
    assert_eq!(market.collateral_factor, dec!(0.5));

    let comptroller = store.get_comptroller("1").await?.expect("comptroller");
    assert_eq!(comptroller.price_oracle, Some(ORACLE.to_string()));

    let stats_id = format!("{}-{}", MARKET, ALICE);
    let stats = store.get_stats(&stats_id).await?.expect("stats");
    assert!(stats.entered_market);

    assert!(store.get_account(&ALICE.to_string()).await?.is_some());
    Ok(())
}
