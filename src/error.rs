//! Error taxonomy for the projection core

use alloy_primitives::U256;
use thiserror::Error;

/// Failures a single event's projection can surface.
///
/// Forward-reference gaps (an event naming a market that has not been
/// listed yet) are not errors; the handlers skip those silently. Everything
/// here is fatal for the event it occurred in and propagates to the
/// delivery layer untouched.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// A handler required an entity that has no record yet
    #[error("{entity} {id} does not exist")]
    MissingEntity { entity: &'static str, id: String },

    /// Mantissa value outside the representable decimal range
    #[error("mantissa {0} out of range")]
    MantissaOverflow(U256),
}
