//! Unit tests for the per-row signal classifier

use trendlens::models::indicators::IndicatorRow;
use trendlens::models::signal::Signal;
use trendlens::signals::classifier::{SignalClassifier, SignalThresholds};

fn classify(rsi: f64, adx: f64, momentum: f64, tsi: f64) -> Signal {
    SignalClassifier::default().classify(&IndicatorRow::new(rsi, adx, momentum, tsi))
}

#[test]
fn test_low_rsi_is_always_oversold() {
    for &(adx, momentum, tsi) in &[
        (0.0, 0.0, 0.0),
        (50.0, 5.0, 1.0),
        (10.0, -5.0, -1.0),
        (f64::NAN, f64::NAN, f64::NAN),
    ] {
        assert_eq!(classify(29.9, adx, momentum, tsi), Signal::Oversold);
        assert_eq!(classify(0.0, adx, momentum, tsi), Signal::Oversold);
    }
}

#[test]
fn test_high_rsi_is_always_overbought() {
    for &(adx, momentum, tsi) in &[
        (0.0, 0.0, 0.0),
        (50.0, 5.0, 1.0),
        (10.0, -5.0, -1.0),
    ] {
        assert_eq!(classify(70.1, adx, momentum, tsi), Signal::Overbought);
        assert_eq!(classify(100.0, adx, momentum, tsi), Signal::Overbought);
    }
}

#[test]
fn test_override_discards_sell_base_label() {
    // base votes: buy 1 (rsi), sell 2 -> sell; rsi override wins
    assert_eq!(classify(20.0, 10.0, -1.0, -1.0), Signal::Oversold);
}

#[test]
fn test_all_buy_votes_is_booming_buy() {
    assert_eq!(classify(50.0, 30.0, 1.0, 0.5), Signal::BoomingBuy);
}

#[test]
fn test_majority_buy() {
    // buy 2 (adx, momentum), sell 1 (tsi): 2/3 < 0.8
    assert_eq!(classify(50.0, 30.0, 1.0, -0.5), Signal::Buy);
}

#[test]
fn test_majority_sell() {
    assert_eq!(classify(50.0, 10.0, -1.0, -0.5), Signal::Sell);
    // buy 1 (adx), sell 2
    assert_eq!(classify(50.0, 30.0, -1.0, -0.5), Signal::Sell);
}

#[test]
fn test_tie_is_hold() {
    assert_eq!(classify(50.0, 10.0, 1.0, -0.5), Signal::Hold);
}

#[test]
fn test_no_votes_is_hold() {
    assert_eq!(classify(50.0, 25.0, 0.0, 0.0), Signal::Hold);
}

#[test]
fn test_undefined_row_is_hold() {
    let row = IndicatorRow::undefined();
    assert_eq!(SignalClassifier::default().classify(&row), Signal::Hold);
}

#[test]
fn test_undefined_rsi_keeps_base_label() {
    assert_eq!(classify(f64::NAN, 30.0, 1.0, 1.0), Signal::BoomingBuy);
    assert_eq!(classify(f64::NAN, 10.0, -1.0, -1.0), Signal::Sell);
}

#[test]
fn test_thresholds_are_strict() {
    assert_eq!(classify(30.0, 30.0, 1.0, 1.0), Signal::BoomingBuy);
    assert_eq!(classify(70.0, 30.0, 1.0, 1.0), Signal::BoomingBuy);
    assert_eq!(classify(50.0, 25.0, 1.0, -1.0), Signal::Hold);
}

#[test]
fn test_infinite_tsi_counts_as_positive() {
    assert_eq!(classify(50.0, 10.0, 1.0, f64::INFINITY), Signal::BoomingBuy);
}

#[test]
fn test_custom_thresholds() {
    let classifier = SignalClassifier::new(SignalThresholds {
        oversold_rsi: 20.0,
        overbought_rsi: 80.0,
        ..SignalThresholds::default()
    });
    let row = IndicatorRow::new(25.0, 10.0, -1.0, -1.0);
    assert_eq!(classifier.classify(&row), Signal::Sell);
    assert_eq!(classifier.thresholds().strong_trend_adx, 25.0);
}

#[test]
fn test_classify_series_preserves_order() {
    let rows = vec![
        IndicatorRow::new(10.0, 0.0, 0.0, 0.0),
        IndicatorRow::new(90.0, 0.0, 0.0, 0.0),
        IndicatorRow::undefined(),
    ];
    assert_eq!(
        SignalClassifier::default().classify_series(&rows),
        vec![Signal::Oversold, Signal::Overbought, Signal::Hold]
    );
}
