//! Daily equity scanner: four technical indicators per bar, reduced to a
//! categorical recommendation per ticker.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
