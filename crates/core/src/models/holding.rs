use serde::{Deserialize, Serialize};

/// A currently-held portfolio position with cost basis and market value.
///
/// Invariant: `value == quantity * current_price` and
/// `pl == value - quantity * avg_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, unique within a portfolio snapshot
    pub symbol: String,

    /// Number of shares held
    pub quantity: f64,

    /// Average acquisition price per share
    pub avg_price: f64,

    /// Latest market price per share
    pub current_price: f64,

    /// Market value: quantity × current_price
    pub value: f64,

    /// Unrealized profit/loss: value − quantity × avg_price
    pub pl: f64,

    /// Unrealized P/L as a percentage of cost basis
    pub pl_percent: f64,
}

impl Holding {
    /// Cost basis of this position (quantity × average price).
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.avg_price
    }
}
