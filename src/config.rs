//! Environment-driven configuration.

use crate::indicators::DEFAULT_WINDOW;
use crate::services::yahoo::DEFAULT_BASE_URL;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// EGX30 constituents scanned when `TICKERS` is not set.
pub const DEFAULT_TICKERS: [&str; 30] = [
    "ABUK.CA", "COMI.CA", "CIEB.CA", "ETEL.CA", "EFG.CA", "ESRS.CA",
    "HRHO.CA", "MNHD.CA", "SWDY.CA", "TALAAT.CA", "AUTO.CA", "CCAP.CA",
    "ORAS.CA", "JUFO.CA", "ORWE.CA", "PHDC.CA", "PACHIN.CA", "AMER.CA",
    "MFPC.CA", "CLHO.CA", "ISPH.CA", "SKPC.CA", "FWRY.CA", "DCRC.CA",
    "TAMWEEL.CA", "ALCN.CA", "SUGR.CA", "EGTS.CA", "BINV.CA", "EGCH.CA",
];

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_MAX_RETRIES: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("TICKERS is set but contains no symbols")]
    EmptyRoster,

    #[error("invalid YAHOO_BASE_URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Get the current environment name (`APP_ENV`, then `ENVIRONMENT`).
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

pub fn get_port() -> Result<u16, ConfigError> {
    parse_var("PORT", "port number", DEFAULT_PORT)
}

/// Ticker roster from `TICKERS` (comma separated), or the EGX30 default.
pub fn get_tickers() -> Result<Vec<String>, ConfigError> {
    match env::var("TICKERS") {
        Ok(raw) => parse_tickers(&raw),
        Err(_) => Ok(default_tickers()),
    }
}

pub fn default_tickers() -> Vec<String> {
    DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect()
}

pub fn parse_tickers(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut tickers: Vec<String> = Vec::new();
    for ticker in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let ticker = ticker.to_uppercase();
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    if tickers.is_empty() {
        return Err(ConfigError::EmptyRoster);
    }
    Ok(tickers)
}

pub fn get_window() -> Result<usize, ConfigError> {
    non_zero("INDICATOR_WINDOW", parse_var("INDICATOR_WINDOW", "integer", DEFAULT_WINDOW)?)
}

pub fn get_concurrency() -> Result<usize, ConfigError> {
    non_zero("SCAN_CONCURRENCY", parse_var("SCAN_CONCURRENCY", "integer", DEFAULT_CONCURRENCY)?)
}

pub fn get_max_retries() -> Result<usize, ConfigError> {
    parse_var("PROVIDER_MAX_RETRIES", "integer", DEFAULT_MAX_RETRIES)
}

pub fn get_yahoo_base_url() -> Result<Url, ConfigError> {
    let raw = env::var("YAHOO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    Ok(Url::parse(&raw)?)
}

/// Everything the binaries read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    pub tickers: Vec<String>,
    pub window: usize,
    pub concurrency: usize,
    pub yahoo_base_url: Url,
    pub max_retries: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: get_environment(),
            port: get_port()?,
            tickers: get_tickers()?,
            window: get_window()?,
            concurrency: get_concurrency()?,
            yahoo_base_url: get_yahoo_base_url()?,
            max_retries: get_max_retries()?,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn non_zero(name: &'static str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Zero(name));
    }
    Ok(value)
}
