//! Market data provider interface.

use crate::models::price::{DateRange, PriceBar, PriceHistory, PriceHistoryError};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream error {code}: {description}")]
    Upstream { code: String, description: String },

    #[error("malformed market data: {0}")]
    Malformed(String),

    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),

    #[error(transparent)]
    History(#[from] PriceHistoryError),
}

impl MarketDataError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` within the inclusive `range`.
    ///
    /// An unknown symbol or a range without trading days yields an empty
    /// history rather than an error.
    async fn get_price_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<PriceHistory, MarketDataError>;
}

/// In-memory provider serving fixed bars per symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    bars: HashMap<String, Vec<PriceBar>>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.insert(symbol, bars);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) {
        self.bars.insert(symbol.into(), bars);
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_price_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<PriceHistory, MarketDataError> {
        let Some(bars) = self.bars.get(symbol) else {
            return Ok(PriceHistory::empty());
        };

        let selected: Vec<PriceBar> = bars
            .iter()
            .filter(|bar| range.contains(bar.date))
            .copied()
            .collect();

        Ok(PriceHistory::new(selected)?)
    }
}
