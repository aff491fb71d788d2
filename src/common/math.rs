//! Series helpers shared by the indicator implementations.
//!
//! Every helper returns a vector aligned 1:1 with its input. Positions that
//! cannot be computed yet are `f64::NAN`, and NaN inputs propagate into any
//! window that contains them.

/// First difference: `values[i] - values[i - 1]`, NaN at index 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    lagged_diff(values, 1)
}

/// Lagged difference: `values[i] - values[i - lag]`, NaN for `i < lag`.
pub fn lagged_diff(values: &[f64], lag: usize) -> Vec<f64> {
    if lag == 0 {
        return vec![f64::NAN; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i < lag {
                f64::NAN
            } else {
                value - values[i - lag]
            }
        })
        .collect()
}

/// Trailing sum over `window` values.
///
/// Defined once `window` values are available and none of them is NaN.
pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![f64::NAN; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return f64::NAN;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                slice.iter().sum()
            }
        })
        .collect()
}

/// Trailing simple moving average over `window` values.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_sum(values, window)
        .into_iter()
        .map(|sum| sum / window as f64)
        .collect()
}

/// Exponential moving average with span `span` (`alpha = 2 / (span + 1)`).
///
/// Leading NaNs are skipped; the average is seeded with the first defined
/// value and then follows `ema[i] = alpha * x[i] + (1 - alpha) * ema[i - 1]`.
/// A NaN after the seed carries the previous average forward.
pub fn ewm(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return vec![f64::NAN; values.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &value in values {
        let next = match (prev, value.is_nan()) {
            (None, true) => None,
            (None, false) => Some(value),
            (Some(p), true) => Some(p),
            (Some(p), false) => Some(alpha * value + (1.0 - alpha) * p),
        };
        out.push(next.unwrap_or(f64::NAN));
        prev = next;
    }

    out
}

/// Index of the first defined (non-NaN) value, if any.
pub fn first_defined(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !v.is_nan())
}
