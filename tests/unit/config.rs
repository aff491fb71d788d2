//! Unit tests for configuration helpers

use trendlens::config::{default_tickers, parse_tickers, ConfigError, DEFAULT_TICKERS};
use trendlens::logging::is_production;

#[test]
fn test_default_roster() {
    let tickers = default_tickers();
    assert_eq!(tickers.len(), 30);
    assert_eq!(tickers[0], "ABUK.CA");
    assert_eq!(tickers.len(), DEFAULT_TICKERS.len());
}

#[test]
fn test_parse_tickers_trims_and_dedups() {
    let tickers = parse_tickers(" comi.ca, ETEL.CA ,,COMI.CA ").unwrap();
    assert_eq!(tickers, vec!["COMI.CA".to_string(), "ETEL.CA".to_string()]);
}

#[test]
fn test_parse_tickers_rejects_empty_roster() {
    assert!(matches!(parse_tickers(" , ,"), Err(ConfigError::EmptyRoster)));
}

#[test]
fn test_production_environment_names() {
    assert!(is_production("production"));
    assert!(is_production("prod"));
    assert!(!is_production("sandbox"));
}
