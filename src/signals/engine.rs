//! Signal evaluation pipeline: price history -> indicators -> labels.

use crate::indicators::IndicatorEngine;
use crate::models::indicators::IndicatorRow;
use crate::models::price::PriceHistory;
use crate::models::signal::Signal;
use crate::signals::classifier::{SignalClassifier, SignalThresholds};

/// Output of one pipeline run, aligned 1:1 with the input history.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub rows: Vec<IndicatorRow>,
    pub signals: Vec<Signal>,
}

impl Evaluation {
    /// The label of the most recent bar.
    pub fn recommendation(&self) -> Signal {
        // `SignalEngine::evaluate` never builds an empty evaluation.
        self.signals.last().copied().unwrap_or(Signal::Hold)
    }

    pub fn latest_indicators(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine {
    indicators: IndicatorEngine,
    classifier: SignalClassifier,
}

impl SignalEngine {
    pub fn new(window: usize, thresholds: SignalThresholds) -> Self {
        Self {
            indicators: IndicatorEngine::new(window),
            classifier: SignalClassifier::new(thresholds),
        }
    }

    pub fn window(&self) -> usize {
        self.indicators.window()
    }

    /// Evaluate a history. Returns `None` when there are no bars to classify.
    pub fn evaluate(&self, history: &PriceHistory) -> Option<Evaluation> {
        if history.is_empty() {
            return None;
        }

        let rows = self.indicators.compute(history);
        let signals = self.classifier.classify_series(&rows);

        Some(Evaluation { rows, signals })
    }
}
