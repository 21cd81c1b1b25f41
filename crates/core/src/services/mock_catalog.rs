use chrono::{NaiveDate, Utc};

use crate::models::analytics::{JournalStats, PortfolioSummary};
use crate::models::broker::LiveQuote;
use crate::models::holding::Holding;
use crate::models::market::{AnalyticsPoint, ScannerRow};
use crate::models::trade::{Trade, TradeSide};
use crate::services::stats;

/// Static deterministic demo dataset, served whenever no broker connection
/// exists or a live fetch fails.
///
/// Pure functions, no error conditions. The same call always returns the
/// same rows, so views stay stable across renders and tests can pin exact
/// values (e.g., the AAPL holding is always worth 9115).
pub struct MockCatalog;

// Dates in the fixture are static and known-valid.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

impl MockCatalog {
    /// Five closed trades: three winners, two losers (60% win rate).
    pub fn trades() -> Vec<Trade> {
        vec![
            Trade {
                id: "1".to_string(),
                symbol: "AAPL".to_string(),
                side: TradeSide::Buy,
                quantity: 10.0,
                entry_price: 175.5,
                exit_price: 182.3,
                date: date(2025, 10, 15),
                profit: 680.0,
                profit_percent: 3.88,
            },
            Trade {
                id: "2".to_string(),
                symbol: "GOOGL".to_string(),
                side: TradeSide::Buy,
                quantity: 5.0,
                entry_price: 140.2,
                exit_price: 138.9,
                date: date(2025, 10, 14),
                profit: -65.0,
                profit_percent: -1.09,
            },
            Trade {
                id: "3".to_string(),
                symbol: "MSFT".to_string(),
                side: TradeSide::Sell,
                quantity: 8.0,
                entry_price: 420.5,
                exit_price: 425.8,
                date: date(2025, 10, 13),
                profit: -424.0,
                profit_percent: -1.26,
            },
            Trade {
                id: "4".to_string(),
                symbol: "TSLA".to_string(),
                side: TradeSide::Buy,
                quantity: 20.0,
                entry_price: 245.1,
                exit_price: 258.7,
                date: date(2025, 10, 12),
                profit: 2720.0,
                profit_percent: 5.57,
            },
            Trade {
                id: "5".to_string(),
                symbol: "NVDA".to_string(),
                side: TradeSide::Buy,
                quantity: 3.0,
                entry_price: 875.2,
                exit_price: 895.5,
                date: date(2025, 10, 11),
                profit: 609.0,
                profit_percent: 2.32,
            },
        ]
    }

    /// Five holdings. Values satisfy `value == quantity * current_price`.
    pub fn holdings() -> Vec<Holding> {
        vec![
            Holding {
                symbol: "AAPL".to_string(),
                quantity: 50.0,
                avg_price: 170.2,
                current_price: 182.3,
                value: 9115.0,
                pl: 605.0,
                pl_percent: 7.11,
            },
            Holding {
                symbol: "MSFT".to_string(),
                quantity: 25.0,
                avg_price: 410.5,
                current_price: 425.8,
                value: 10645.0,
                pl: 382.5,
                pl_percent: 3.73,
            },
            Holding {
                symbol: "GOOGL".to_string(),
                quantity: 15.0,
                avg_price: 135.8,
                current_price: 138.9,
                value: 2083.5,
                pl: 46.5,
                pl_percent: 2.28,
            },
            Holding {
                symbol: "TSLA".to_string(),
                quantity: 40.0,
                avg_price: 240.5,
                current_price: 258.7,
                value: 10348.0,
                pl: 728.0,
                pl_percent: 7.56,
            },
            Holding {
                symbol: "NVDA".to_string(),
                quantity: 8.0,
                avg_price: 860.2,
                current_price: 895.5,
                value: 7164.0,
                pl: 282.4,
                pl_percent: 4.10,
            },
        ]
    }

    /// Six scanner rows across the three movement categories.
    pub fn scanners() -> Vec<ScannerRow> {
        vec![
            ScannerRow {
                symbol: "MSTR".to_string(),
                price: 245.3,
                change: 18.5,
                change_percent: 8.18,
                volume: 2_450_000,
                category: "Top Gainers".to_string(),
            },
            ScannerRow {
                symbol: "COIN".to_string(),
                price: 165.8,
                change: 12.3,
                change_percent: 8.01,
                volume: 3_120_000,
                category: "Top Gainers".to_string(),
            },
            ScannerRow {
                symbol: "CRM".to_string(),
                price: 312.5,
                change: -15.2,
                change_percent: -4.64,
                volume: 1_890_000,
                category: "Top Losers".to_string(),
            },
            ScannerRow {
                symbol: "AMZN".to_string(),
                price: 198.7,
                change: 8.2,
                change_percent: 4.31,
                volume: 4_230_000,
                category: "Most Active".to_string(),
            },
            ScannerRow {
                symbol: "META".to_string(),
                price: 545.9,
                change: 22.1,
                change_percent: 4.22,
                volume: 3_560_000,
                category: "Top Gainers".to_string(),
            },
            ScannerRow {
                symbol: "NFLX".to_string(),
                price: 287.4,
                change: -18.6,
                change_percent: -6.07,
                volume: 2_780_000,
                category: "Top Losers".to_string(),
            },
        ]
    }

    /// Fifteen days of cumulative-profit history for the analytics chart.
    pub fn analytics() -> Vec<AnalyticsPoint> {
        let series = [
            ("10/01", 145.0, 2),
            ("10/02", 425.0, 4),
            ("10/03", 280.0, 3),
            ("10/04", 812.0, 5),
            ("10/05", 645.0, 4),
            ("10/06", 1230.0, 6),
            ("10/07", 1560.0, 7),
            ("10/08", 1450.0, 5),
            ("10/09", 2105.0, 8),
            ("10/10", 1945.0, 6),
            ("10/11", 2554.0, 7),
            ("10/12", 3274.0, 8),
            ("10/13", 2850.0, 6),
            ("10/14", 2785.0, 5),
            ("10/15", 3465.0, 7),
        ];
        series
            .iter()
            .map(|(label, cum_profit, trades)| AnalyticsPoint {
                date: (*label).to_string(),
                cum_profit: *cum_profit,
                trades: *trades,
            })
            .collect()
    }

    /// Portfolio summary derived from the mock holdings and trades.
    pub fn portfolio_summary() -> PortfolioSummary {
        let win_rate = Self::journal_stats().win_rate;
        stats::summarize_holdings(&Self::holdings(), win_rate)
    }

    /// Journal stats derived from the mock trades.
    pub fn journal_stats() -> JournalStats {
        stats::journal_stats(&Self::trades())
    }

    /// Placeholder quote used when the live quote path is unavailable.
    /// The timestamp is the only non-fixed field.
    pub fn quote(symbol: &str) -> LiveQuote {
        LiveQuote {
            symbol: symbol.to_string(),
            price: 45230.50,
            change: 1250.30,
            change_percent: 2.84,
            timestamp: Utc::now(),
        }
    }
}
