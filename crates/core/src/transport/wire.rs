//! Broker-native record shapes, exactly as the remote integration API
//! sends them (snake_case, flat). The reconciliation layer normalizes
//! these into the canonical dashboard models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::trade::TradeSide;

/// An open position as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerPosition {
    pub symbol: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub unrealized_pnl: f64,
    pub unrealized_pnl_percent: f64,
}

/// A single execution as reported by the broker. One leg only — pairing
/// into round-trip trades happens (if at all) downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerTrade {
    #[serde(default)]
    pub id: Option<i64>,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub execution_time: DateTime<Utc>,
}

/// Account-level aggregate as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerSummary {
    pub total_value: f64,
    pub total_pnl: f64,
    pub total_pnl_percent: f64,
    pub positions_count: usize,
}

/// Cash balance for one broker account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerBalance {
    pub broker_account_id: i64,
    pub cash: f64,
    pub buying_power: f64,
    pub currency: String,
}
