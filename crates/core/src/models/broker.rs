use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Supported broker integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerType {
    /// Interactive Brokers (TWS / IB Gateway)
    Ibkr,
    // Future brokers slot in here without touching existing code
}

impl std::fmt::Display for BrokerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokerType::Ibkr => write!(f, "ibkr"),
        }
    }
}

/// Lifecycle status of a broker account connection.
///
/// Permitted transitions:
/// - `Pending → Active` (initial connection test succeeded)
/// - `Pending → Error` (initial connection test failed)
/// - `Active → Disconnected` (explicit disconnect or remote signal)
/// - `Error → Active` (manual reconnect/resync succeeded)
///
/// Status strings the API may send in the future deserialize to `Unknown`,
/// which renders as its own bucket instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Active,
    Error,
    Disconnected,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Pending => write!(f, "pending"),
            ConnectionStatus::Active => write!(f, "active"),
            ConnectionStatus::Error => write!(f, "error"),
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
            ConnectionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl ConnectionStatus {
    /// Whether moving from `self` to `next` is a permitted transition.
    pub fn can_transition_to(self, next: ConnectionStatus) -> bool {
        use ConnectionStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Error) | (Active, Disconnected) | (Error, Active)
        )
    }

    /// CSS badge class used by the account list view.
    pub fn badge_class(self) -> &'static str {
        match self {
            ConnectionStatus::Active => "status-active",
            ConnectionStatus::Pending => "status-pending",
            ConnectionStatus::Error => "status-error",
            ConnectionStatus::Disconnected => "status-disconnected",
            ConnectionStatus::Unknown => "status-unknown",
        }
    }

    /// Status glyph used by the account list view.
    pub fn icon(self) -> &'static str {
        match self {
            ConnectionStatus::Active => "✓",
            ConnectionStatus::Pending => "⏳",
            ConnectionStatus::Error => "✗",
            ConnectionStatus::Disconnected => "○",
            ConnectionStatus::Unknown => "?",
        }
    }
}

/// A broker account known to the dashboard, as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerAccount {
    pub id: i64,
    pub user_id: i64,
    pub broker: BrokerType,
    pub account_code: String,
    pub conn_host: String,
    pub conn_port: u16,
    pub client_id: i64,
    pub status: ConnectionStatus,
    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied parameters for a new broker connection.
///
/// Validated locally before any network dispatch; see [`ConnectParams::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectParams {
    pub broker: BrokerType,
    pub account_code: String,
    pub conn_host: String,
    pub conn_port: u16,
    pub client_id: i64,
}

impl Default for ConnectParams {
    fn default() -> Self {
        // Matches the connection form defaults (local TWS paper-trading port).
        Self {
            broker: BrokerType::Ibkr,
            account_code: String::new(),
            conn_host: "127.0.0.1".to_string(),
            conn_port: 7497,
            client_id: 1,
        }
    }
}

impl ConnectParams {
    /// Validate connection parameters with field-level errors.
    ///
    /// Rules:
    /// - `account_code` must be non-empty
    /// - `conn_host` must be non-empty
    /// - `conn_port` must be in [1000, 65535]
    /// - `client_id` must be ≥ 1
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.account_code.trim().is_empty() {
            return Err(CoreError::invalid_parameter(
                "account_code",
                "account code must not be empty",
            ));
        }
        if self.conn_host.trim().is_empty() {
            return Err(CoreError::invalid_parameter(
                "conn_host",
                "host must not be empty",
            ));
        }
        if self.conn_port < 1000 {
            return Err(CoreError::invalid_parameter(
                "conn_port",
                format!("port {} is out of range 1000-65535", self.conn_port),
            ));
        }
        if self.client_id < 1 {
            return Err(CoreError::invalid_parameter(
                "client_id",
                format!("client id {} must be at least 1", self.client_id),
            ));
        }
        Ok(())
    }
}

/// Detailed connection probe for one account (the `/status/{id}` endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionProbe {
    pub broker_account_id: i64,
    pub db_status: String,
    pub connection_exists: bool,
    pub connection_active: bool,
    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
}

/// Acknowledgement of a background data sync (the `/sync/{id}` endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReceipt {
    pub status: String,
    pub broker_account_id: i64,
}

/// A point-in-time quote for a symbol. Ephemeral — refreshed on a fixed
/// interval, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub timestamp: DateTime<Utc>,
}
