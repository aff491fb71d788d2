//! Common helpers

pub mod math;
