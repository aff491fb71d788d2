//! RSI (Relative Strength Index) indicator

use crate::common::math;

/// Calculate the RSI-style momentum oscillator for every close.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are plain trailing means of the last `period` deltas, so the
/// first `period` rows are NaN. When the average loss is zero the value
/// saturates at 100; a window with neither gains nor losses is NaN.
pub fn momentum_oscillator(closes: &[f64], period: usize) -> Vec<f64> {
    let deltas = math::diff(closes);
    let gains: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { f64::NAN } else { d.max(0.0) })
        .collect();
    let losses: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { f64::NAN } else { (-d).max(0.0) })
        .collect();

    let avg_gains = math::rolling_mean(&gains, period);
    let avg_losses = math::rolling_mean(&losses, period);

    avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|(&avg_gain, &avg_loss)| rsi_from_averages(avg_gain, avg_loss))
        .collect()
}

/// Calculate RSI with default period (14)
pub fn momentum_oscillator_default(closes: &[f64]) -> Vec<f64> {
    momentum_oscillator(closes, 14)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return f64::NAN;
    }
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { f64::NAN } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
