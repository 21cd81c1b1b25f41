//! Derived-statistic computation. Pure functions, no I/O.
//!
//! Every ratio guards its denominator: an empty journal or a zero cost
//! basis produces 0, never a division error or NaN.

use crate::models::analytics::{JournalStats, PortfolioSummary};
use crate::models::holding::Holding;
use crate::models::market::{ScannerFilter, ScannerRow};
use crate::models::trade::Trade;

/// Aggregate win/loss statistics over a set of trades.
///
/// Winners are trades with profit strictly greater than zero; break-even
/// trades count as losers, so `winners + losers == total_trades` always
/// holds.
pub fn journal_stats(trades: &[Trade]) -> JournalStats {
    let total_trades = trades.len();
    if total_trades == 0 {
        return JournalStats::empty();
    }

    let winners = trades.iter().filter(|t| t.profit > 0.0).count();
    let total_profit: f64 = trades.iter().map(|t| t.profit).sum();

    JournalStats {
        total_trades,
        winners,
        losers: total_trades - winners,
        win_rate: (winners as f64 / total_trades as f64) * 100.0,
        total_profit,
        avg_trade: total_profit / total_trades as f64,
    }
}

/// Roll holdings up into a portfolio summary.
///
/// The percentage return is computed against the cost basis summed
/// directly from the holdings (quantity × avg price), not back-derived
/// from `total_value - total_pl`, so a portfolio whose P/L equals its
/// value cannot divide by zero. `win_rate` comes from trade history and is
/// passed in by the caller.
pub fn summarize_holdings(holdings: &[Holding], win_rate: f64) -> PortfolioSummary {
    let total_value: f64 = holdings.iter().map(|h| h.value).sum();
    let total_pl: f64 = holdings.iter().map(|h| h.pl).sum();
    let cost_basis: f64 = holdings.iter().map(Holding::cost_basis).sum();

    let pl_percent = if cost_basis > 0.0 {
        (total_pl / cost_basis) * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        total_value,
        total_pl,
        pl_percent,
        holdings: holdings.len(),
        win_rate,
    }
}

/// Apply a scanner filter to a row set without mutating it.
pub fn filter_scanners(rows: &[ScannerRow], filter: ScannerFilter) -> Vec<ScannerRow> {
    rows.iter()
        .filter(|row| filter.matches(row))
        .cloned()
        .collect()
}
