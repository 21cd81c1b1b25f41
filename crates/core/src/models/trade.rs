use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    /// Long entry / buy-to-open
    Buy,
    /// Short entry / sell-to-open
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A closed (or partially known) trade in the journal.
///
/// **Important**: broker executions arrive as single legs. Until a paired
/// closing leg is matched, `profit` and `profit_percent` are 0 and
/// `exit_price` mirrors `entry_price`. Mock trades always carry both legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Identifier assigned by the source (broker execution id or mock id)
    pub id: String,

    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,

    /// Buy or Sell
    pub side: TradeSide,

    /// Number of shares/contracts (always positive)
    pub quantity: f64,

    /// Price at entry
    pub entry_price: f64,

    /// Price at exit (equals entry when no closing leg exists)
    pub exit_price: f64,

    /// Execution date (daily granularity)
    pub date: NaiveDate,

    /// Signed profit in account currency
    pub profit: f64,

    /// Signed profit as a percentage of the entry value
    pub profit_percent: f64,
}
