//! Signal classification and aggregation.

pub mod aggregation;
pub mod classifier;
pub mod engine;

pub use aggregation::{Bucket, RecommendationSummary, SummaryAggregator, SUMMARY_SIGNALS};
pub use classifier::{SignalClassifier, SignalThresholds};
pub use engine::{Evaluation, SignalEngine};
