pub mod engine;

pub mod momentum;
pub mod trend;

pub use engine::{IndicatorEngine, DEFAULT_WINDOW};
