use std::sync::RwLock;

use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::broker::{
    BrokerAccount, ConnectParams, ConnectionProbe, ConnectionStatus, LiveQuote, SyncReceipt,
};
use crate::transport::traits::BrokerApi;
use crate::transport::wire::{BrokerBalance, BrokerPosition, BrokerSummary, BrokerTrade};

/// Thin typed client over the remote broker-integration API, plus the local
/// cache of known broker accounts.
///
/// The account cache is the single source of connectivity truth:
/// [`BrokerGateway::has_active_connection`] is recomputed from it on every
/// call, never memoized, since connection state can change between loads.
/// Cache updates are applied atomically per remote response.
///
/// This component never fabricates data. On any failure the error is
/// surfaced to the caller — deciding whether to substitute mock data is the
/// reconciliation layer's job.
pub struct BrokerGateway {
    api: Box<dyn BrokerApi>,
    accounts: RwLock<Vec<BrokerAccount>>,
}

impl BrokerGateway {
    pub fn new(api: Box<dyn BrokerApi>) -> Self {
        Self {
            api,
            accounts: RwLock::new(Vec::new()),
        }
    }

    // ── Account cache ───────────────────────────────────────────────

    /// Refresh the account cache from the remote API.
    ///
    /// Transport failures propagate — the cache keeps its previous
    /// contents and the caller decides what to do. The list is never
    /// silently emptied on error.
    pub async fn load_accounts(&self) -> Result<(), CoreError> {
        let accounts = self.api.list_accounts().await?;
        debug!(count = accounts.len(), "loaded broker accounts");
        *self.accounts.write().expect("account cache poisoned") = accounts;
        Ok(())
    }

    /// Snapshot of all cached broker accounts.
    pub fn accounts(&self) -> Vec<BrokerAccount> {
        self.accounts.read().expect("account cache poisoned").clone()
    }

    /// True iff any cached account has status `active`. Re-evaluated on
    /// every call; this is the flag the reconciliation layer keys off.
    pub fn has_active_connection(&self) -> bool {
        self.accounts
            .read()
            .expect("account cache poisoned")
            .iter()
            .any(|acc| acc.status == ConnectionStatus::Active)
    }

    /// First account with status `active`, used when a caller does not
    /// name one. Fails with `NoActiveAccount` before any network call.
    pub fn default_account_id(&self) -> Result<i64, CoreError> {
        self.accounts
            .read()
            .expect("account cache poisoned")
            .iter()
            .find(|acc| acc.status == ConnectionStatus::Active)
            .map(|acc| acc.id)
            .ok_or(CoreError::NoActiveAccount)
    }

    fn resolve_account(&self, account_id: Option<i64>) -> Result<i64, CoreError> {
        match account_id {
            Some(id) => Ok(id),
            None => self.default_account_id(),
        }
    }

    // ── Connection lifecycle ────────────────────────────────────────

    /// Create and test a new broker connection.
    ///
    /// Parameters are validated locally (field-level errors) before any
    /// network dispatch. On success the new account is appended to the
    /// cache; on failure the remote error message is surfaced unmodified.
    pub async fn connect(&self, params: &ConnectParams) -> Result<BrokerAccount, CoreError> {
        params.validate()?;
        let account = self.api.connect(params).await?;
        info!(
            account_id = account.id,
            status = %account.status,
            "broker connection created"
        );
        self.accounts
            .write()
            .expect("account cache poisoned")
            .push(account.clone());
        Ok(account)
    }

    /// Disconnect a broker account. The cached entry is removed only
    /// after the remote side confirms.
    pub async fn disconnect(&self, account_id: i64) -> Result<(), CoreError> {
        self.api.disconnect(account_id).await?;
        info!(account_id, "broker account disconnected");
        self.accounts
            .write()
            .expect("account cache poisoned")
            .retain(|acc| acc.id != account_id);
        Ok(())
    }

    /// Probe the live connection state of one account.
    pub async fn connection_status(&self, account_id: i64) -> Result<ConnectionProbe, CoreError> {
        self.api.connection_status(account_id).await
    }

    /// Kick off a background data sync for one account.
    pub async fn sync(&self, account_id: i64) -> Result<SyncReceipt, CoreError> {
        self.api.sync(account_id).await
    }

    /// Re-sync an account that is in the `error` state. A successful sync
    /// drives the `error → active` transition.
    pub async fn resync(&self, account_id: i64) -> Result<SyncReceipt, CoreError> {
        let receipt = self.api.sync(account_id).await?;
        let status = self
            .accounts
            .read()
            .expect("account cache poisoned")
            .iter()
            .find(|acc| acc.id == account_id)
            .map(|acc| acc.status)
            .ok_or(CoreError::AccountNotFound(account_id))?;
        if status == ConnectionStatus::Error {
            self.apply_status(account_id, ConnectionStatus::Active)?;
        }
        Ok(receipt)
    }

    /// Apply a status change to a cached account, enforcing the permitted
    /// transition table. Applying the current status again is a no-op.
    pub fn apply_status(
        &self,
        account_id: i64,
        next: ConnectionStatus,
    ) -> Result<(), CoreError> {
        let mut accounts = self.accounts.write().expect("account cache poisoned");
        let account = accounts
            .iter_mut()
            .find(|acc| acc.id == account_id)
            .ok_or(CoreError::AccountNotFound(account_id))?;
        if account.status == next {
            return Ok(());
        }
        if !account.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: account.status.to_string(),
                to: next.to_string(),
            });
        }
        debug!(account_id, from = %account.status, to = %next, "connection status changed");
        account.status = next;
        Ok(())
    }

    // ── Account-scoped data queries ─────────────────────────────────

    /// Open positions. Resolves the default active account when none is
    /// given; the no-active-account error fires before any network call.
    pub async fn positions(
        &self,
        account_id: Option<i64>,
    ) -> Result<Vec<BrokerPosition>, CoreError> {
        let id = self.resolve_account(account_id)?;
        self.api.positions(id).await
    }

    /// Execution history.
    pub async fn trades(&self, account_id: Option<i64>) -> Result<Vec<BrokerTrade>, CoreError> {
        let id = self.resolve_account(account_id)?;
        self.api.trades(id).await
    }

    /// Account-level portfolio aggregate.
    pub async fn portfolio_summary(
        &self,
        account_id: Option<i64>,
    ) -> Result<BrokerSummary, CoreError> {
        let id = self.resolve_account(account_id)?;
        self.api.portfolio_summary(id).await
    }

    /// Cash balance.
    pub async fn balance(&self, account_id: Option<i64>) -> Result<BrokerBalance, CoreError> {
        let id = self.resolve_account(account_id)?;
        self.api.balance(id).await
    }

    /// Point-in-time quote. Failures surface to the caller — no silent
    /// placeholder here.
    pub async fn quote(&self, symbol: &str) -> Result<LiveQuote, CoreError> {
        self.api.quote(symbol).await
    }
}
