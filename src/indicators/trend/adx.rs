//! ADX-like trend strength indicator

use crate::common::math;
use crate::models::price::PriceBar;

/// Calculate the trend-strength measure for every bar.
///
/// This is not Wilder's ADX. Each bar contributes a range proxy
///
/// ```text
/// max(high[i] - high[i-1], close[i-1] - (low[i] - low[i-1]), low[i] - low[i-1])
/// ```
///
/// and the result is the trailing sum of `period` proxies. Row 0 has no
/// proxy, so the first defined value is at index `period`.
pub fn trend_strength(bars: &[PriceBar], period: usize) -> Vec<f64> {
    let proxies: Vec<f64> = (0..bars.len())
        .map(|i| {
            if i == 0 {
                return f64::NAN;
            }
            let (prev, cur) = (&bars[i - 1], &bars[i]);
            let high_move = cur.high - prev.high;
            let low_move = cur.low - prev.low;
            high_move.max(prev.close - low_move).max(low_move)
        })
        .collect();

    math::rolling_sum(&proxies, period)
}

/// Calculate trend strength with default period (14)
pub fn trend_strength_default(bars: &[PriceBar]) -> Vec<f64> {
    trend_strength(bars, 14)
}
