//! TSI-style smoothed momentum oscillator

use crate::common::math;

/// Ratio of a double-smoothed to a single-smoothed price change.
///
/// ```text
/// d    = close[i] - close[i-1]
/// ema1 = EMA(d, span = period)
/// ema2 = EMA(ema1, span = period)
/// tsi  = ema2 / ema1
/// ```
///
/// Both averages are seeded at their first defined input, so only row 0 is
/// NaN. A zero `ema1` follows IEEE division (infinite, or NaN for 0/0).
pub fn smoothed_momentum_oscillator(closes: &[f64], period: usize) -> Vec<f64> {
    let changes = math::diff(closes);
    let ema1 = math::ewm(&changes, period);
    let ema2 = math::ewm(&ema1, period);

    ema2.iter().zip(ema1.iter()).map(|(&e2, &e1)| e2 / e1).collect()
}

/// Calculate the smoothed momentum oscillator with default period (14)
pub fn smoothed_momentum_oscillator_default(closes: &[f64]) -> Vec<f64> {
    smoothed_momentum_oscillator(closes, 14)
}
