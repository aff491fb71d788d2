//! Trendlens API Server
//!
//! HTTP API exposing single-ticker recommendations, the roster summary and
//! the oversold filter. Stateless; every request fetches fresh history.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use trendlens::config::AppConfig;
use trendlens::core::http::start_server;
use trendlens::core::runtime::{RuntimeConfig, ScanRuntime};
use trendlens::logging;
use trendlens::metrics::Metrics;
use trendlens::services::yahoo::{RetryPolicy, YahooMarketDataProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!("Starting Trendlens API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        tickers = config.tickers.len(),
        window = config.window,
        concurrency = config.concurrency,
        "Scanning {} tickers with a {}-bar window",
        config.tickers.len(),
        config.window
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider = YahooMarketDataProvider::new(config.yahoo_base_url.clone())?.with_retry(RetryPolicy {
        max_retries: config.max_retries,
        ..RetryPolicy::default()
    });

    let runtime_config = RuntimeConfig {
        tickers: config.tickers.clone(),
        window: config.window,
        concurrency: config.concurrency,
        ..RuntimeConfig::default()
    };
    let runtime = Arc::new(ScanRuntime::new(runtime_config, Arc::new(provider)).with_metrics(metrics.clone()));

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, runtime, metrics).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
