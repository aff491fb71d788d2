//! Unit tests for the trend strength measure

use chrono::NaiveDate;
use trendlens::indicators::trend::{trend_strength, trend_strength_default};
use trendlens::models::price::PriceBar;

fn bar(day: u32, high: f64, low: f64, close: f64) -> PriceBar {
    let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    PriceBar::new(date, close, high, low, close, 1_000)
}

#[test]
fn test_trend_strength_trailing_sum_of_proxy() {
    let bars = vec![
        bar(1, 10.0, 8.0, 9.0),
        // max(1, 9 - 1, 1) = 8
        bar(2, 11.0, 9.0, 10.0),
        // max(2, 10 - 1, 1) = 9
        bar(3, 13.0, 10.0, 12.0),
        // max(-1, 12 + 3, -3) = 15
        bar(4, 12.0, 7.0, 8.0),
    ];
    let adx = trend_strength(&bars, 2);
    assert!(adx[0].is_nan());
    assert!(adx[1].is_nan());
    assert_eq!(adx[2], 17.0);
    assert_eq!(adx[3], 24.0);
}

#[test]
fn test_trend_strength_first_defined_at_window() {
    let bars: Vec<PriceBar> = (1..=20)
        .map(|d| bar(d, 100.0 + d as f64, 98.0 + d as f64, 99.0 + d as f64))
        .collect();
    let adx = trend_strength_default(&bars);
    assert!(adx[..14].iter().all(|v| v.is_nan()));
    assert!(adx[14..].iter().all(|v| v.is_finite()));
}

#[test]
fn test_trend_strength_insufficient_data() {
    let bars: Vec<PriceBar> = (1..=14).map(|d| bar(d, 11.0, 9.0, 10.0)).collect();
    assert!(trend_strength_default(&bars).iter().all(|v| v.is_nan()));
}
