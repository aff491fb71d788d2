use serde::{Deserialize, Serialize};

/// The four indicator values computed for one bar.
///
/// A field is NaN while the history is too short for its window. NaN and
/// infinite values serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub rsi: f64,
    pub adx: f64,
    pub momentum: f64,
    pub tsi: f64,
}

impl IndicatorRow {
    pub fn new(rsi: f64, adx: f64, momentum: f64, tsi: f64) -> Self {
        Self {
            rsi,
            adx,
            momentum,
            tsi,
        }
    }

    /// A row for which no indicator is defined yet.
    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    pub fn is_fully_defined(&self) -> bool {
        !(self.rsi.is_nan() || self.adx.is_nan() || self.momentum.is_nan() || self.tsi.is_nan())
    }
}
