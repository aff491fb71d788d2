//! Momentum indicators: RSI, rate of change, TSI

pub mod roc;
pub mod rsi;
pub mod tsi;

pub use roc::*;
pub use rsi::*;
pub use tsi::*;
