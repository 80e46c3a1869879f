//! Price normalization using rust_decimal for precision

use rust_decimal::prelude::*;

/// Stored prices keep two decimal places (half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Round a validated price to cents.
///
/// Non-finite input never reaches here; validation rejects it first.
pub fn round_price(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| {
            d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
