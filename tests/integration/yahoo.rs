//! Integration tests for the Yahoo chart provider against a mocked upstream

use chrono::NaiveDate;
use serde_json::json;
use std::time::Duration;
use trendlens::models::price::DateRange;
use trendlens::services::market_data::{MarketDataError, MarketDataProvider};
use trendlens::services::yahoo::{RetryPolicy, YahooMarketDataProvider};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHART_PATH: &str = "/v8/finance/chart/UP.CA";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap()
}

fn provider(server: &MockServer, max_retries: usize) -> YahooMarketDataProvider {
    YahooMarketDataProvider::with_client(Url::parse(&server.uri()).unwrap(), reqwest::Client::new())
        .with_retry(RetryPolicy {
            max_retries,
            min_delay: Duration::from_millis(10),
        })
}

fn chart_body() -> serde_json::Value {
    // 2024-01-02 07:00 UTC, 2024-01-02 23:00 UTC (Jan 3 in Cairo), 2024-01-04 07:00 UTC
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "UP.CA", "gmtoffset": 7200 },
                "timestamp": [1704178800, 1704236400, 1704351600],
                "indicators": {
                    "quote": [{
                        "open":   [10.0, 10.5, null],
                        "high":   [11.0, 11.5, 12.5],
                        "low":    [9.5, 10.0, 11.0],
                        "close":  [10.5, 11.0, 12.0],
                        "volume": [1000, null, 3000]
                    }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn fetches_daily_bars_in_exchange_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .and(query_param("interval", "1d"))
        .and(query_param("period1", "1704067200"))
        // period2 covers the whole end date
        .and(query_param("period2", "1706745600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .expect(1)
        .mount(&server)
        .await;

    let history = provider(&server, 0)
        .get_price_history("UP.CA", &january())
        .await
        .unwrap();

    // The third bar has no open and is dropped
    assert_eq!(history.len(), 2);
    let bars = history.bars();
    assert_eq!(bars[0].date, date(2024, 1, 2));
    assert_eq!(bars[0].volume, 1000);
    assert_eq!(bars[1].date, date(2024, 1, 3));
    assert_eq!(bars[1].close, 11.0);
    assert_eq!(bars[1].volume, 0);
}

#[tokio::test]
async fn unknown_symbol_yields_empty_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })))
        .mount(&server)
        .await;

    let history = provider(&server, 0)
        .get_price_history("UP.CA", &january())
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn server_error_is_reported_after_retries_run_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, 0)
        .get_price_history("UP.CA", &january())
        .await
        .unwrap_err();

    match err {
        MarketDataError::UpstreamStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected upstream status error, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_failure_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .expect(1)
        .mount(&server)
        .await;

    let history = provider(&server, 2)
        .get_price_history("UP.CA", &january())
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, 3)
        .get_price_history("UP.CA", &january())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::UpstreamStatus { status: 400, .. }));
}

#[tokio::test]
async fn long_non_ascii_error_body_is_cut_on_char_boundary() {
    let server = MockServer::start().await;
    // Byte 512 falls inside the two-byte 'é'
    let body = format!("{}é tail", "x".repeat(511));
    Mock::given(method("GET"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(body))
        .mount(&server)
        .await;

    let err = provider(&server, 0)
        .get_price_history("UP.CA", &january())
        .await
        .unwrap_err();

    match err {
        MarketDataError::UpstreamStatus { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "x".repeat(511));
        }
        other => panic!("expected upstream status error, got {other:?}"),
    }
}
