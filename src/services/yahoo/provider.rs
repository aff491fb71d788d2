//! Yahoo chart API market data provider implementation

use crate::models::price::{DateRange, PriceBar, PriceHistory};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::messages::{ChartResponse, ChartResult};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; trendlens/0.1)";
const MAX_ERROR_BODY: usize = 512;

/// Retry settings for transient upstream failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub min_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_delay: Duration::from_millis(500),
        }
    }
}

pub struct YahooMarketDataProvider {
    base_url: Url,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: Url) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self {
            base_url,
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidSymbol(symbol.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MarketDataError::Malformed(format!("base URL {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<PriceHistory, MarketDataError> {
        let url = self.chart_url(symbol)?;
        let period1 = midnight_timestamp(range.start()).to_string();
        // period2 is exclusive upstream; ask for the day after `end`.
        let after_end = range.end().checked_add_days(Days::new(1)).unwrap_or(range.end());
        let period2 = midnight_timestamp(after_end).to_string();

        debug!(symbol = %symbol, url = %url, "Yahoo: requesting daily chart");

        let response = self
            .client
            .get(url)
            .query(&[
                ("interval", "1d"),
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(parsed) = serde_json::from_str::<ChartResponse>(&body) {
                if parsed.chart.error.as_ref().is_some_and(|e| e.means_no_data()) {
                    debug!(symbol = %symbol, "Yahoo: symbol not found, treating as no data");
                    return Ok(PriceHistory::empty());
                }
            }
            return Err(MarketDataError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        parse_chart(&body, range)
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_price_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<PriceHistory, MarketDataError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry.min_delay)
            .with_max_times(self.retry.max_retries);

        let history = (|| self.fetch_once(symbol, range))
            .retry(backoff)
            .when(|e: &MarketDataError| e.is_transient())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(symbol = %symbol, error = %e, delay_ms = delay.as_millis() as u64, "Yahoo: retrying chart request");
            })
            .await?;

        debug!(symbol = %symbol, bars = history.len(), "Yahoo: fetched {} bars for {}", history.len(), symbol);
        Ok(history)
    }
}

/// Parse a chart response body into a history restricted to `range`.
pub fn parse_chart(body: &str, range: &DateRange) -> Result<PriceHistory, MarketDataError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::Malformed(e.to_string()))?;

    if let Some(error) = response.chart.error {
        if error.means_no_data() {
            return Ok(PriceHistory::empty());
        }
        return Err(MarketDataError::Upstream {
            code: error.code,
            description: error.description,
        });
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceHistory::empty());
    };

    Ok(PriceHistory::from_unordered(bars_from_result(result, range)))
}

fn bars_from_result(result: ChartResult, range: &DateRange) -> Vec<PriceBar> {
    let offset = result.meta.as_ref().map(|m| m.gmtoffset).unwrap_or(0);
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Vec::new();
    };

    let value = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

    result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts.checked_add(offset)?, 0)?.date_naive();
            if !range.contains(date) {
                return None;
            }
            Some(PriceBar {
                date,
                open: value(&quote.open, i)?,
                high: value(&quote.high, i)?,
                low: value(&quote.low, i)?,
                close: value(&quote.close, i)?,
                volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            })
        })
        .collect()
}

/// Cut an error body to at most `MAX_ERROR_BODY` bytes on a char boundary.
fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
