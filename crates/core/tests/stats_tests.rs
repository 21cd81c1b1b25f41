// ═══════════════════════════════════════════════════════════════════
// Derived-Statistics Tests — journal aggregation, portfolio rollup,
// scanner filtering, demo-catalog consistency
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use trading_dashboard_core::models::holding::Holding;
use trading_dashboard_core::models::market::{ScannerFilter, ScannerRow};
use trading_dashboard_core::models::trade::{Trade, TradeSide};
use trading_dashboard_core::services::mock_catalog::MockCatalog;
use trading_dashboard_core::services::stats;

fn trade(symbol: &str, profit: f64) -> Trade {
    Trade {
        id: symbol.to_lowercase(),
        symbol: symbol.to_string(),
        side: TradeSide::Buy,
        quantity: 10.0,
        entry_price: 100.0,
        exit_price: 100.0 + profit / 10.0,
        date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        profit,
        profit_percent: profit / 10.0,
    }
}

fn holding(symbol: &str, quantity: f64, avg_price: f64, current_price: f64) -> Holding {
    let value = quantity * current_price;
    let pl = value - quantity * avg_price;
    Holding {
        symbol: symbol.to_string(),
        quantity,
        avg_price,
        current_price,
        value,
        pl,
        pl_percent: if avg_price > 0.0 {
            (current_price / avg_price - 1.0) * 100.0
        } else {
            0.0
        },
    }
}

// ═══════════════════════════════════════════════════════════════════
// Journal statistics
// ═══════════════════════════════════════════════════════════════════

#[test]
fn winners_and_losers_always_sum_to_total() {
    let trades = vec![
        trade("A", 150.0),
        trade("B", -40.0),
        trade("C", 0.0),
        trade("D", 12.5),
    ];
    let stats = stats::journal_stats(&trades);
    assert_eq!(stats.total_trades, 4);
    assert_eq!(stats.winners + stats.losers, stats.total_trades);
    assert_eq!(stats.winners, 2);
    // Break-even trades count as losers.
    assert_eq!(stats.losers, 2);
}

#[test]
fn empty_journal_yields_zeroed_stats() {
    let stats = stats::journal_stats(&[]);
    assert_eq!(stats.total_trades, 0);
    assert_eq!(stats.winners, 0);
    assert_eq!(stats.losers, 0);
    assert_eq!(stats.win_rate, 0.0);
    assert_eq!(stats.total_profit, 0.0);
    assert_eq!(stats.avg_trade, 0.0);
}

#[test]
fn win_rate_stays_within_percentage_bounds() {
    let all_losses = vec![trade("A", -5.0), trade("B", -1.0)];
    assert_eq!(stats::journal_stats(&all_losses).win_rate, 0.0);

    let all_wins = vec![trade("A", 5.0), trade("B", 1.0)];
    assert_eq!(stats::journal_stats(&all_wins).win_rate, 100.0);

    let mixed = vec![trade("A", 5.0), trade("B", -1.0), trade("C", 2.0)];
    let rate = stats::journal_stats(&mixed).win_rate;
    assert!((0.0..=100.0).contains(&rate));
    assert!((rate - 66.666).abs() < 0.01);
}

#[test]
fn total_and_average_profit_match_the_inputs() {
    let trades = vec![trade("A", 300.0), trade("B", -100.0), trade("C", 200.0)];
    let stats = stats::journal_stats(&trades);
    assert_eq!(stats.total_profit, 400.0);
    assert!((stats.avg_trade - 400.0 / 3.0).abs() < 1e-9);
}

// ═══════════════════════════════════════════════════════════════════
// Portfolio rollup
// ═══════════════════════════════════════════════════════════════════

#[test]
fn summary_totals_are_sums_over_holdings() {
    let holdings = vec![
        holding("AAA", 10.0, 100.0, 110.0), // value 1100, pl 100
        holding("BBB", 5.0, 200.0, 190.0),  // value 950, pl -50
    ];
    let summary = stats::summarize_holdings(&holdings, 50.0);
    assert_eq!(summary.total_value, 2050.0);
    assert_eq!(summary.total_pl, 50.0);
    assert_eq!(summary.holdings, 2);
    assert_eq!(summary.win_rate, 50.0);

    // cost basis = 10*100 + 5*200 = 2000
    assert!((summary.pl_percent - 2.5).abs() < 1e-9);
}

#[test]
fn zero_cost_basis_yields_zero_percent_not_nan() {
    let free_shares = vec![holding("GIFT", 10.0, 0.0, 5.0)];
    let summary = stats::summarize_holdings(&free_shares, 0.0);
    assert_eq!(summary.total_value, 50.0);
    assert_eq!(summary.total_pl, 50.0);
    assert_eq!(summary.pl_percent, 0.0);
    assert!(!summary.pl_percent.is_nan());

    let empty = stats::summarize_holdings(&[], 0.0);
    assert_eq!(empty.pl_percent, 0.0);
    assert!(!empty.pl_percent.is_nan());
}

// ═══════════════════════════════════════════════════════════════════
// Scanner filtering
// ═══════════════════════════════════════════════════════════════════

#[test]
fn loser_filter_selects_only_negative_movers() {
    let rows = MockCatalog::scanners();
    let losers = stats::filter_scanners(&rows, ScannerFilter::Losers);
    let symbols: Vec<&str> = losers.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["CRM", "NFLX"]);
    assert!(losers.iter().all(|r| r.change_percent < 0.0));
}

#[test]
fn gainer_filter_selects_all_positive_movers() {
    let rows = MockCatalog::scanners();
    let gainers = stats::filter_scanners(&rows, ScannerFilter::Gainers);
    let symbols: Vec<&str> = gainers.iter().map(|r| r.symbol.as_str()).collect();
    // AMZN moves up, so it qualifies even though its category is
    // "Most Active".
    assert_eq!(symbols, vec!["MSTR", "COIN", "AMZN", "META"]);
}

#[test]
fn most_active_filter_matches_on_category() {
    let rows = MockCatalog::scanners();
    let active = stats::filter_scanners(&rows, ScannerFilter::MostActive);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].symbol, "AMZN");
}

#[test]
fn all_filter_returns_rows_unmodified_and_in_order() {
    let rows = MockCatalog::scanners();
    let all = stats::filter_scanners(&rows, ScannerFilter::All);
    assert_eq!(all, rows);
    assert_eq!(all.len(), 6);
}

#[test]
fn volume_formats_with_magnitude_suffixes() {
    let row = |volume: u64| ScannerRow {
        symbol: "X".to_string(),
        price: 1.0,
        change: 0.0,
        change_percent: 0.0,
        volume,
        category: "Top Gainers".to_string(),
    };
    assert_eq!(row(45_200_000).format_volume(), "45.2M");
    assert_eq!(row(1_000_000).format_volume(), "1.0M");
    assert_eq!(row(853_000).format_volume(), "853.0K");
    assert_eq!(row(1_000).format_volume(), "1.0K");
    assert_eq!(row(999).format_volume(), "999");
}

// ═══════════════════════════════════════════════════════════════════
// Demo catalog consistency
// ═══════════════════════════════════════════════════════════════════

#[test]
fn catalog_datasets_are_deterministic() {
    assert_eq!(MockCatalog::trades(), MockCatalog::trades());
    assert_eq!(MockCatalog::holdings(), MockCatalog::holdings());
    assert_eq!(MockCatalog::scanners(), MockCatalog::scanners());
    assert_eq!(MockCatalog::analytics(), MockCatalog::analytics());
}

#[test]
fn catalog_holdings_values_are_internally_consistent() {
    for h in MockCatalog::holdings() {
        assert!(
            (h.value - h.quantity * h.current_price).abs() < 0.01,
            "{}: value {} != quantity*price {}",
            h.symbol,
            h.value,
            h.quantity * h.current_price
        );
    }
}

#[test]
fn catalog_journal_stats_match_the_fixed_trades() {
    let stats = MockCatalog::journal_stats();
    assert_eq!(stats.total_trades, 5);
    assert_eq!(stats.winners, 3);
    assert_eq!(stats.losers, 2);
    assert_eq!(stats.win_rate, 60.0);
    assert!((stats.total_profit - 3520.0).abs() < 1e-9);
    assert!((stats.avg_trade - 704.0).abs() < 1e-9);
}

#[test]
fn catalog_summary_rolls_up_the_fixed_holdings() {
    let summary = MockCatalog::portfolio_summary();
    assert!((summary.total_value - 39355.5).abs() < 1e-6);
    assert!((summary.total_pl - 2044.4).abs() < 1e-6);
    assert_eq!(summary.holdings, 5);
    assert_eq!(summary.win_rate, 60.0);

    // Percentage return against direct cost basis (37311.1).
    assert!((summary.pl_percent - 2044.4 / 37311.1 * 100.0).abs() < 1e-9);
    assert!(summary.pl_percent > 5.4 && summary.pl_percent < 5.6);
}

#[test]
fn catalog_analytics_series_is_cumulative_and_dated() {
    let points = MockCatalog::analytics();
    assert_eq!(points.len(), 15);
    assert_eq!(points.first().unwrap().date, "10/01");
    assert_eq!(points.last().unwrap().date, "10/15");
    assert_eq!(points.last().unwrap().cum_profit, 3465.0);
}
