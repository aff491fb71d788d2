//! Rate of change (price momentum) indicator

use crate::common::math;

/// Absolute change over `period` bars: `close[i] - close[i - period]`.
///
/// NaN for `i < period`.
pub fn rate_of_change(closes: &[f64], period: usize) -> Vec<f64> {
    math::lagged_diff(closes, period)
}

/// Calculate rate of change with default period (14)
pub fn rate_of_change_default(closes: &[f64]) -> Vec<f64> {
    rate_of_change(closes, 14)
}
