//! Computes the four aligned indicator series for one price history.

use crate::indicators::momentum::{momentum_oscillator, rate_of_change, smoothed_momentum_oscillator};
use crate::indicators::trend::trend_strength;
use crate::models::indicators::IndicatorRow;
use crate::models::price::PriceHistory;

pub const DEFAULT_WINDOW: usize = 14;

#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    window: usize,
}

impl IndicatorEngine {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// One row per bar, in bar order.
    pub fn compute(&self, history: &PriceHistory) -> Vec<IndicatorRow> {
        let closes = history.closes();

        let rsi = momentum_oscillator(&closes, self.window);
        let adx = trend_strength(history.bars(), self.window);
        let momentum = rate_of_change(&closes, self.window);
        let tsi = smoothed_momentum_oscillator(&closes, self.window);

        (0..history.len())
            .map(|i| IndicatorRow::new(rsi[i], adx[i], momentum[i], tsi[i]))
            .collect()
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
