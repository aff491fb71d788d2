//! Scan runtime: runs the signal pipeline over a roster of tickers.

use crate::config::{default_tickers, DEFAULT_CONCURRENCY};
use crate::indicators::DEFAULT_WINDOW;
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorRow;
use crate::models::price::DateRange;
use crate::models::signal::Signal;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::signals::aggregation::{RecommendationSummary, SummaryAggregator};
use crate::signals::classifier::SignalThresholds;
use crate::signals::engine::SignalEngine;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const NO_DATA_MESSAGE: &str = "No data available for the provided ticker.";

/// Configuration for the scan runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tickers: Vec<String>,
    pub window: usize,
    pub concurrency: usize,
    pub thresholds: SignalThresholds,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            window: DEFAULT_WINDOW,
            concurrency: DEFAULT_CONCURRENCY,
            thresholds: SignalThresholds::default(),
        }
    }
}

/// Latest recommendation for one ticker.
#[derive(Debug, Clone, Serialize)]
pub struct TickerRecommendation {
    pub ticker: String,
    /// `None` when the provider returned no bars.
    pub recommendation: Option<Signal>,
    pub indicators: Option<IndicatorRow>,
    pub bars: usize,
}

impl TickerRecommendation {
    pub fn message(&self) -> String {
        match self.recommendation {
            Some(signal) => format!("Recommendation for {}: {}", self.ticker, signal.label()),
            None => NO_DATA_MESSAGE.to_string(),
        }
    }
}

pub struct ScanRuntime {
    config: RuntimeConfig,
    engine: SignalEngine,
    provider: Arc<dyn MarketDataProvider>,
    metrics: Option<Arc<Metrics>>,
}

impl ScanRuntime {
    pub fn new(config: RuntimeConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        let engine = SignalEngine::new(config.window, config.thresholds);
        Self {
            config,
            engine,
            provider,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn tickers(&self) -> &[String] {
        &self.config.tickers
    }

    /// Fetch and evaluate a single ticker.
    pub async fn recommend(
        &self,
        ticker: &str,
        range: &DateRange,
    ) -> Result<TickerRecommendation, MarketDataError> {
        let history = self
            .provider
            .get_price_history(ticker, range)
            .await
            .inspect_err(|e| {
                warn!(ticker = %ticker, error = %e, "ScanRuntime: market data request failed");
                if let Some(metrics) = &self.metrics {
                    metrics.market_data_errors_total.inc();
                }
            })?;

        let Some(evaluation) = self.engine.evaluate(&history) else {
            debug!(ticker = %ticker, "ScanRuntime: no price history for {}", ticker);
            if let Some(metrics) = &self.metrics {
                metrics.tickers_without_data_total.inc();
            }
            return Ok(TickerRecommendation {
                ticker: ticker.to_string(),
                recommendation: None,
                indicators: None,
                bars: 0,
            });
        };

        let signal = evaluation.recommendation();
        if let Some(metrics) = &self.metrics {
            metrics.record_signal(signal);
        }
        debug!(
            ticker = %ticker,
            bars = history.len(),
            signal = %signal,
            "ScanRuntime: {} -> {}",
            ticker,
            signal
        );

        Ok(TickerRecommendation {
            ticker: ticker.to_string(),
            recommendation: Some(signal),
            indicators: evaluation.latest_indicators().copied(),
            bars: history.len(),
        })
    }

    /// Evaluate the whole roster. Results keep roster order; tickers without
    /// data or with a failed fetch are left out.
    pub async fn scan(&self, range: &DateRange) -> Vec<(String, Signal)> {
        let concurrency = self.config.concurrency.max(1);
        info!(
            tickers = self.config.tickers.len(),
            concurrency = concurrency,
            start = %range.start(),
            end = %range.end(),
            "ScanRuntime: scanning {} tickers",
            self.config.tickers.len()
        );

        let results: Vec<Option<(String, Signal)>> = stream::iter(self.config.tickers.clone())
            .map(|ticker| async move {
                match self.recommend(&ticker, range).await {
                    Ok(rec) => rec.recommendation.map(|signal| (rec.ticker, signal)),
                    Err(_) => None,
                }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let scanned: Vec<(String, Signal)> = results.into_iter().flatten().collect();
        info!(
            evaluated = scanned.len(),
            skipped = self.config.tickers.len() - scanned.len(),
            "ScanRuntime: scan finished"
        );
        scanned
    }

    /// Bucket the roster by latest signal.
    pub async fn summarize(&self, range: &DateRange) -> RecommendationSummary {
        let mut aggregator = SummaryAggregator::new();
        for (ticker, signal) in self.scan(range).await {
            aggregator.record(ticker, signal);
        }
        aggregator.finish()
    }

    /// Tickers whose latest signal is exactly `Oversold`.
    pub async fn oversold(&self, range: &DateRange) -> Vec<String> {
        self.scan(range)
            .await
            .into_iter()
            .filter(|(_, signal)| *signal == Signal::Oversold)
            .map(|(ticker, _)| ticker)
            .collect()
    }
}
