//! Prometheus metrics for the HTTP layer and the scan runtime.

use crate::models::signal::Signal;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: Counter,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: Histogram,
    pub tickers_evaluated_total: CounterVec,
    pub tickers_without_data_total: Counter,
    pub market_data_errors_total: Counter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            Counter::with_opts(Opts::new("http_requests_total", "Total HTTP requests served"))?;
        let http_requests_in_flight = Gauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let tickers_evaluated_total = CounterVec::new(
            Opts::new(
                "tickers_evaluated_total",
                "Tickers run through the signal pipeline, by latest signal",
            ),
            &["signal"],
        )?;
        let tickers_without_data_total = Counter::with_opts(Opts::new(
            "tickers_without_data_total",
            "Tickers skipped because no price history was returned",
        ))?;
        let market_data_errors_total = Counter::with_opts(Opts::new(
            "market_data_errors_total",
            "Failed market data requests",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(tickers_evaluated_total.clone()))?;
        registry.register(Box::new(tickers_without_data_total.clone()))?;
        registry.register(Box::new(market_data_errors_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            tickers_evaluated_total,
            tickers_without_data_total,
            market_data_errors_total,
        })
    }

    pub fn record_signal(&self, signal: Signal) {
        self.tickers_evaluated_total
            .with_label_values(&[signal.key()])
            .inc();
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
