use thiserror::Error;

/// Unified error type for the trading-dashboard core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Transport failures, missing-account preconditions, and malformed broker
/// responses are all recoverable: the reconciliation layer catches them and
/// falls back to the mock catalog. Validation and session errors are
/// surfaced to the caller directly.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport / Remote API ──────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    /// Remote broker API rejected the request. The message is the remote
    /// `detail` string, passed through unmodified.
    #[error("Broker error: {message}")]
    Broker { message: String },

    #[error("Malformed broker response: {0}")]
    MalformedResponse(String),

    // ── Preconditions ───────────────────────────────────────────────
    #[error("No active broker account")]
    NoActiveAccount,

    #[error("Broker account not found: {0}")]
    AccountNotFound(i64),

    // ── Validation ──────────────────────────────────────────────────
    #[error("Invalid value for '{field}': {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Invalid connection status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    // ── Session / Token ─────────────────────────────────────────────
    #[error("Invalid auth token: {0}")]
    InvalidToken(String),
}

impl CoreError {
    /// Field-level validation error helper.
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so a
        // bearer token or account code can never leak into logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::MalformedResponse(e.to_string())
    }
}
