//! Result formatting helpers

use crate::number::Number;

/// Decimal places used when no precision is configured
pub const DEFAULT_PRECISION: u32 = 2;

/// Scaled magnitudes at or above this have no fractional digits left
const MAX_EXACT_SCALED: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to specified decimal places (half away from zero)
///
/// Values too large to carry `decimals` fractional digits are returned
/// unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_SCALED {
        return value;
    }
    scaled.round() / factor
}

/// Round float results for display; integers pass through unchanged
pub fn format_result(result: Number, precision: u32) -> Number {
    match result {
        Number::Int(_) => result,
        Number::Float(v) if v.is_finite() => Number::Float(round_to(v, precision)),
        Number::Float(_) => result,
    }
}
