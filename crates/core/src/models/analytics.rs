use serde::{Deserialize, Serialize};

/// Aggregate snapshot of the whole portfolio, recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Total market value of all holdings
    pub total_value: f64,

    /// Total unrealized profit/loss
    pub total_pl: f64,

    /// P/L as a percentage of cost basis (0 when cost basis is 0)
    pub pl_percent: f64,

    /// Number of distinct holdings
    pub holdings: usize,

    /// Win rate derived from trade history (not from holdings)
    pub win_rate: f64,
}

/// Aggregate win/loss statistics computed from closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalStats {
    pub total_trades: usize,

    /// Trades with profit > 0
    pub winners: usize,

    /// Everything else, including break-even trades
    pub losers: usize,

    /// winners / total_trades × 100 (0 for an empty journal)
    pub win_rate: f64,

    /// Sum of profit over all trades
    pub total_profit: f64,

    /// total_profit / total_trades (0 for an empty journal)
    pub avg_trade: f64,
}

impl JournalStats {
    /// Stats for an empty journal — all zeros, no division involved.
    pub fn empty() -> Self {
        Self {
            total_trades: 0,
            winners: 0,
            losers: 0,
            win_rate: 0.0,
            total_profit: 0.0,
            avg_trade: 0.0,
        }
    }
}
