use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical recommendation for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Oversold,
    Overbought,
    BoomingBuy,
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Human-readable label, as shown to end users.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Oversold => "oversold",
            Signal::Overbought => "overbought",
            Signal::BoomingBuy => "booming buy",
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        }
    }

    /// Identifier matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Signal::Oversold => "oversold",
            Signal::Overbought => "overbought",
            Signal::BoomingBuy => "booming_buy",
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        }
    }

    pub fn all() -> [Signal; 6] {
        [
            Signal::Oversold,
            Signal::Overbought,
            Signal::BoomingBuy,
            Signal::Buy,
            Signal::Sell,
            Signal::Hold,
        ]
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
