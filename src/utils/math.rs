//! Integer rounding helpers

use crate::error::{Result, TimeSpanError};

/// Divide rounding to the nearest integer (halves round up)
///
/// # Arguments
/// * `numerator` - Dividend
/// * `denominator` - Divisor, must be non-zero
pub fn div_round(numerator: u128, denominator: u128) -> u128 {
    (numerator + denominator / 2) / denominator
}

/// Narrow a wide intermediate back to a tick or microsecond count
pub fn narrow(value: u128) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| TimeSpanError::InvalidRepresentation(format!("{} does not fit in 64 bits", value)))
}

/// End tick of a span starting at `time`
pub fn end_time(time: u64, length: u64) -> Result<u64> {
    time.checked_add(length).ok_or_else(|| {
        TimeSpanError::InvalidRepresentation(format!("tick range {} + {} overflows", time, length))
    })
}
