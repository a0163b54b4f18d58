//! Comptroller event indexer library
//!
//! Projects an ordered stream of decoded comptroller events (market
//! listings, collateral changes, account entry/exit, protocol-parameter
//! updates) into normalized entity records behind a keyed store.

pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod feed;
pub mod mantissa;
pub mod models;
pub mod processors;

// Re-export commonly used types
pub use config::IndexerConfig;
pub use database::{EntityStore, MemoryStore, RocksDbStore};
pub use error::IndexerError;
pub use events::{ComptrollerEvent, EventMeta, EventRecord};
pub use processors::ProcessorRegistry;
