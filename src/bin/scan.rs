//! Trendlens one-shot scanner
//!
//! Usage: `scan <summary|oversold|TICKER> [START_DATE] [END_DATE]`
//!
//! Dates are `YYYY-MM-DD`. The end date defaults to today and the start date
//! to 180 days before it. Results are printed to stdout as JSON.

use chrono::{Days, NaiveDate, Utc};
use dotenvy::dotenv;
use serde_json::json;
use std::env;
use std::sync::Arc;
use tracing::info;
use trendlens::config::AppConfig;
use trendlens::core::runtime::{RuntimeConfig, ScanRuntime};
use trendlens::logging;
use trendlens::models::price::DateRange;
use trendlens::services::yahoo::{RetryPolicy, YahooMarketDataProvider};

const DEFAULT_LOOKBACK_DAYS: u64 = 180;

enum Mode {
    Summary,
    Oversold,
    Ticker(String),
}

fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", raw, e).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let mode = match args.first().map(String::as_str) {
        None | Some("summary") => Mode::Summary,
        Some("oversold") => Mode::Oversold,
        Some("-h") | Some("--help") => {
            println!("usage: scan <summary|oversold|TICKER> [START_DATE] [END_DATE]");
            return Ok(());
        }
        Some(ticker) => Mode::Ticker(ticker.to_uppercase()),
    };

    let end = match args.get(2) {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    let start = match args.get(1) {
        Some(raw) => parse_date(raw)?,
        None => end
            .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
            .unwrap_or(end),
    };
    let range = DateRange::new(start, end)?;

    let config = AppConfig::from_env()?;
    let provider = YahooMarketDataProvider::new(config.yahoo_base_url.clone())?.with_retry(RetryPolicy {
        max_retries: config.max_retries,
        ..RetryPolicy::default()
    });
    let runtime = ScanRuntime::new(
        RuntimeConfig {
            tickers: config.tickers.clone(),
            window: config.window,
            concurrency: config.concurrency,
            ..RuntimeConfig::default()
        },
        Arc::new(provider),
    );

    info!(start = %start, end = %end, "Trendlens scan");

    let output = match mode {
        Mode::Summary => json!(runtime.summarize(&range).await),
        Mode::Oversold => json!({ "tickers": runtime.oversold(&range).await }),
        Mode::Ticker(ticker) => {
            let recommendation = runtime.recommend(&ticker, &range).await?;
            json!({
                "message": recommendation.message(),
                "recommendation": recommendation,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
