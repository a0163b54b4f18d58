//! Projected entity models
//!
//! Every entity is keyed by a stable string identifier and persisted with
//! upsert semantics; the store owns all records, handlers hold only
//! transient copies while one event is being applied.

pub mod account;
pub mod comptroller;
pub mod market;

pub use account::{Account, CTokenStats};
pub use comptroller::Comptroller;
pub use market::{CToken, Market};
