//! Fixed-point mantissa helpers
//!
//! Rates and factors arrive from the chain as integers scaled by 10^18.
//! These helpers convert them into `Decimal` values, or narrow them to raw
//! integer-scaled form for fields that are stored unscaled.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::error::IndexerError;

/// Fixed-point scale used by the protocol's mantissa values
pub const MANTISSA_DECIMALS: u32 = 18;

/// Convert an 18-decimal fixed-point mantissa into a decimal value.
///
/// Exact for every mantissa that fits the 96-bit decimal representation;
/// anything larger is rejected rather than rounded.
pub fn mantissa_to_decimal(mantissa: U256) -> Result<Decimal, IndexerError> {
    let raw = u128::try_from(mantissa).map_err(|_| IndexerError::MantissaOverflow(mantissa))?;
    let raw = i128::try_from(raw).map_err(|_| IndexerError::MantissaOverflow(mantissa))?;
    Decimal::try_from_i128_with_scale(raw, MANTISSA_DECIMALS)
        .map_err(|_| IndexerError::MantissaOverflow(mantissa))
}

/// Narrow a mantissa to its raw integer-scaled form.
pub fn mantissa_to_u128(mantissa: U256) -> Result<u128, IndexerError> {
    u128::try_from(mantissa).map_err(|_| IndexerError::MantissaOverflow(mantissa))
}
