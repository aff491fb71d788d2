//! Per-bar signal classification.
//!
//! Each row is classified on its own four values; there is no state carried
//! between rows. Comparisons against NaN are false, so an undefined
//! indicator simply contributes no vote.

use crate::models::indicators::IndicatorRow;
use crate::models::signal::Signal;
use serde::{Deserialize, Serialize};

/// Thresholds used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// RSI below this is a buy vote and forces `Oversold`.
    pub oversold_rsi: f64,
    /// RSI above this is a sell vote and forces `Overbought`.
    pub overbought_rsi: f64,
    /// Trend strength above this is a buy vote.
    pub strong_trend_adx: f64,
    /// Minimum share of buy votes for `BoomingBuy`.
    pub booming_buy_ratio: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            oversold_rsi: 30.0,
            overbought_rsi: 70.0,
            strong_trend_adx: 25.0,
            booming_buy_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalClassifier {
    thresholds: SignalThresholds,
}

impl SignalClassifier {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Classify a single row.
    pub fn classify(&self, row: &IndicatorRow) -> Signal {
        let t = &self.thresholds;

        let buy_count = [
            row.rsi < t.oversold_rsi,
            row.adx > t.strong_trend_adx,
            row.momentum > 0.0,
            row.tsi > 0.0,
        ]
        .iter()
        .filter(|&&vote| vote)
        .count();

        let sell_count = [row.rsi > t.overbought_rsi, row.momentum < 0.0, row.tsi < 0.0]
            .iter()
            .filter(|&&vote| vote)
            .count();

        let total = buy_count + sell_count;

        let base = if total == 0 {
            Signal::Hold
        } else if buy_count as f64 / total as f64 >= t.booming_buy_ratio {
            Signal::BoomingBuy
        } else if buy_count > sell_count {
            Signal::Buy
        } else if sell_count > buy_count {
            Signal::Sell
        } else {
            Signal::Hold
        };

        // RSI extremes replace the vote-based label.
        if row.rsi < t.oversold_rsi {
            Signal::Oversold
        } else if row.rsi > t.overbought_rsi {
            Signal::Overbought
        } else {
            base
        }
    }

    /// Classify every row, preserving order.
    pub fn classify_series(&self, rows: &[IndicatorRow]) -> Vec<Signal> {
        rows.iter().map(|row| self.classify(row)).collect()
    }
}
