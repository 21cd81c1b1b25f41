use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::auth::TokenResponse;
use crate::models::broker::{BrokerAccount, ConnectParams, ConnectionProbe, LiveQuote, SyncReceipt};
use crate::transport::wire::{BrokerBalance, BrokerPosition, BrokerSummary, BrokerTrade};

/// Trait abstraction for the remote broker-integration API.
///
/// The gateway and reconciliation layers only ever talk to this trait.
/// Production uses the REST implementation; tests swap in an in-memory
/// mock. If the backend API changes, only the one implementation moves.
#[async_trait]
pub trait BrokerApi: Send + Sync {
    /// All broker accounts belonging to the current principal.
    async fn list_accounts(&self) -> Result<Vec<BrokerAccount>, CoreError>;

    /// Create a broker connection and run the initial connection test.
    /// Parameters are assumed to be validated by the caller.
    async fn connect(&self, params: &ConnectParams) -> Result<BrokerAccount, CoreError>;

    /// Tear down a broker connection on the remote side.
    async fn disconnect(&self, account_id: i64) -> Result<(), CoreError>;

    /// Probe the live connection state of one account.
    async fn connection_status(&self, account_id: i64) -> Result<ConnectionProbe, CoreError>;

    /// Kick off a background data sync for one account.
    async fn sync(&self, account_id: i64) -> Result<SyncReceipt, CoreError>;

    /// Open positions for one account.
    async fn positions(&self, account_id: i64) -> Result<Vec<BrokerPosition>, CoreError>;

    /// Execution history for one account.
    async fn trades(&self, account_id: i64) -> Result<Vec<BrokerTrade>, CoreError>;

    /// Account-level portfolio aggregate.
    async fn portfolio_summary(&self, account_id: i64) -> Result<BrokerSummary, CoreError>;

    /// Cash balance for one account.
    async fn balance(&self, account_id: i64) -> Result<BrokerBalance, CoreError>;

    /// Point-in-time quote for a symbol.
    async fn quote(&self, symbol: &str) -> Result<LiveQuote, CoreError>;
}

/// Trait abstraction for the authentication endpoints. Separate from
/// [`BrokerApi`] because these are the only calls made without a bearer
/// token attached.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, CoreError>;

    async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<TokenResponse, CoreError>;
}
