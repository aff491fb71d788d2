//! Bucketing of per-ticker recommendations into the summary view

use crate::models::signal::Signal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Signals that get a bucket in the summary. `Sell` and `Hold` are computed
/// per ticker but not listed.
pub const SUMMARY_SIGNALS: [Signal; 4] = [
    Signal::Oversold,
    Signal::BoomingBuy,
    Signal::Buy,
    Signal::Overbought,
];

/// Tickers sharing one summary signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    Tickers(Vec<String>),
    Empty,
}

impl Bucket {
    pub fn tickers(&self) -> &[String] {
        match self {
            Bucket::Tickers(tickers) => tickers,
            Bucket::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Bucket::Empty)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Tickers(tickers) => f.write_str(&tickers.join(", ")),
            Bucket::Empty => f.write_str("None"),
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bucket::Tickers(tickers) => tickers.serialize(serializer),
            Bucket::Empty => serializer.serialize_str("None"),
        }
    }
}

/// Collects last-bar signals per ticker, in the order they are recorded.
#[derive(Debug, Clone, Default)]
pub struct SummaryAggregator {
    entries: Vec<(Signal, Vec<String>)>,
}

impl SummaryAggregator {
    pub fn new() -> Self {
        Self {
            entries: SUMMARY_SIGNALS.iter().map(|&s| (s, Vec::new())).collect(),
        }
    }

    /// Record a ticker's signal. Returns `false` if the signal has no bucket.
    pub fn record(&mut self, ticker: impl Into<String>, signal: Signal) -> bool {
        match self.entries.iter_mut().find(|(s, _)| *s == signal) {
            Some((_, tickers)) => {
                tickers.push(ticker.into());
                true
            }
            None => false,
        }
    }

    pub fn finish(self) -> RecommendationSummary {
        RecommendationSummary {
            buckets: self
                .entries
                .into_iter()
                .map(|(signal, tickers)| {
                    let bucket = if tickers.is_empty() {
                        Bucket::Empty
                    } else {
                        Bucket::Tickers(tickers)
                    };
                    (signal, bucket)
                })
                .collect(),
        }
    }
}

/// Summary buckets keyed by signal, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSummary {
    buckets: Vec<(Signal, Bucket)>,
}

impl RecommendationSummary {
    pub fn bucket(&self, signal: Signal) -> Option<&Bucket> {
        self.buckets
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, bucket)| bucket)
    }

    pub fn buckets(&self) -> &[(Signal, Bucket)] {
        &self.buckets
    }
}

impl Serialize for RecommendationSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (signal, bucket) in &self.buckets {
            map.serialize_entry(signal.key(), bucket)?;
        }
        map.end()
    }
}

impl fmt::Display for RecommendationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (signal, bucket) in &self.buckets {
            writeln!(f, "{}: {}", signal.label(), bucket)?;
        }
        Ok(())
    }
}
