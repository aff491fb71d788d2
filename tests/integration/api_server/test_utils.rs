//! Test utilities for API server integration tests

use axum_test::TestServer;
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use trendlens::core::http::{create_router, AppState, HealthStatus};
use trendlens::core::runtime::{RuntimeConfig, ScanRuntime};
use trendlens::metrics::Metrics;
use trendlens::models::price::PriceBar;
use trendlens::services::market_data::StaticMarketDataProvider;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

pub fn series(count: usize, close_at: impl Fn(usize) -> f64) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let close = close_at(i);
            let date = start.checked_add_days(Days::new(i as u64)).unwrap();
            PriceBar::new(date, close, close + 0.5, close - 0.5, close, 1_000)
        })
        .collect()
}

impl TestApiServer {
    pub async fn new() -> Self {
        let provider = StaticMarketDataProvider::new()
            .with_bars("UP.CA", series(40, |i| 100.0 + i as f64))
            .with_bars("DOWN.CA", series(40, |i| 100.0 - i as f64))
            .with_bars("SLIDE.CA", series(40, |i| 60.0 - i as f64 * 0.25));

        let config = RuntimeConfig {
            tickers: vec![
                "UP.CA".to_string(),
                "DOWN.CA".to_string(),
                "EMPTY.CA".to_string(),
                "SLIDE.CA".to_string(),
            ],
            ..RuntimeConfig::default()
        };

        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let runtime = Arc::new(
            ScanRuntime::new(config, Arc::new(provider)).with_metrics(metrics.clone()),
        );
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            runtime,
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
