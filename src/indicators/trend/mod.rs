//! Trend indicators: ADX-like trend strength

pub mod adx;

pub use adx::*;
