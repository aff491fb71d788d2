//! Yahoo Finance chart API integration

pub mod messages;
pub mod provider;

pub use provider::{parse_chart, RetryPolicy, YahooMarketDataProvider, DEFAULT_BASE_URL};
