//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod signal;

pub use indicators::IndicatorRow;
pub use price::{DateRange, DateRangeError, PriceBar, PriceHistory, PriceHistoryError};
pub use signal::Signal;
