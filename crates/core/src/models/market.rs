use serde::{Deserialize, Serialize};

/// One row of the market scanner (movement-grouped symbol list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerRow {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    /// Movement category label (e.g., "Top Gainers", "Most Active")
    pub category: String,
}

/// Scanner view filter. Filtering never mutates the underlying row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerFilter {
    #[default]
    All,
    /// change_percent > 0
    Gainers,
    /// change_percent < 0
    Losers,
    /// category == "Most Active"
    MostActive,
}

impl ScannerFilter {
    /// Whether a row passes this filter.
    pub fn matches(self, row: &ScannerRow) -> bool {
        match self {
            ScannerFilter::All => true,
            ScannerFilter::Gainers => row.change_percent > 0.0,
            ScannerFilter::Losers => row.change_percent < 0.0,
            ScannerFilter::MostActive => row.category == "Most Active",
        }
    }
}

/// One point of the daily cumulative-profit time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPoint {
    /// Display label for the day (e.g., "10/01")
    pub date: String,
    pub cum_profit: f64,
    pub trades: u32,
}

impl ScannerRow {
    /// Human-readable volume, e.g. `2450000` → `"2.5M"`.
    pub fn format_volume(&self) -> String {
        let v = self.volume as f64;
        if self.volume >= 1_000_000 {
            format!("{:.1}M", v / 1_000_000.0)
        } else if self.volume >= 1_000 {
            format!("{:.1}K", v / 1_000.0)
        } else {
            self.volume.to_string()
        }
    }
}
