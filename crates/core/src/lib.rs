pub mod errors;
pub mod models;
pub mod services;
pub mod transport;

use std::sync::Arc;
use std::time::Duration;

use models::{
    analytics::{JournalStats, PortfolioSummary},
    broker::{BrokerAccount, ConnectParams, ConnectionProbe, LiveQuote, SyncReceipt},
    holding::Holding,
    market::{AnalyticsPoint, ScannerFilter, ScannerRow},
    sourced::Sourced,
    trade::Trade,
};
use services::{
    broker_gateway::BrokerGateway,
    quote_ticker::{QuoteTicker, QUOTE_REFRESH_PERIOD},
    reconciliation::ReconciliationService,
    session::{SessionService, TokenStore, TOKEN_KEY},
};
use transport::{
    rest::{RestAuthApi, RestBrokerApi},
    traits::{AuthApi, BrokerApi},
    wire::BrokerBalance,
};

use errors::CoreError;

/// Main entry point for the trading-dashboard core library.
///
/// Owns the broker gateway, the reconciliation layer, and the auth
/// session. Views only ever talk to this type: every data accessor
/// returns a canonical shape tagged with its provenance (live broker vs
/// demo data), and no call here is fatal — the dashboard can always
/// render with mock data even when the broker integration is unreachable.
#[must_use]
pub struct TradingDashboard {
    gateway: Arc<BrokerGateway>,
    reconciliation: Arc<ReconciliationService>,
    session: SessionService,
}

impl std::fmt::Debug for TradingDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingDashboard")
            .field("accounts", &self.gateway.accounts().len())
            .field("broker_connected", &self.gateway.has_active_connection())
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl TradingDashboard {
    /// Build the dashboard from explicit transport implementations.
    /// Tests inject mocks here; production normally uses [`Self::connect_rest`].
    pub fn new(
        broker_api: Box<dyn BrokerApi>,
        auth_api: Box<dyn AuthApi>,
        token_store: Arc<dyn TokenStore>,
    ) -> Self {
        let gateway = Arc::new(BrokerGateway::new(broker_api));
        let reconciliation = Arc::new(ReconciliationService::new(Arc::clone(&gateway)));
        let session = SessionService::new(auth_api, token_store);
        Self {
            gateway,
            reconciliation,
            session,
        }
    }

    /// Build the dashboard against the REST backend at `base_url`.
    ///
    /// The broker client reads its bearer token from the token store on
    /// every request, so login/logout take effect immediately. Auth
    /// endpoints are the only ones called without a token.
    pub fn connect_rest(base_url: &str, token_store: Arc<dyn TokenStore>) -> Self {
        let source_store = Arc::clone(&token_store);
        let broker_api = RestBrokerApi::new(base_url)
            .with_token_source(Arc::new(move || source_store.get(TOKEN_KEY)));
        let auth_api = RestAuthApi::new(base_url);
        Self::new(Box::new(broker_api), Box::new(auth_api), token_store)
    }

    // ── Session ─────────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> Result<(), CoreError> {
        self.session.login(username, password).await
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<(), CoreError> {
        self.session.register(username, password, role).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.session.current_user()
    }

    #[must_use]
    pub fn current_role(&self) -> Option<String> {
        self.session.current_role()
    }

    // ── Broker accounts ─────────────────────────────────────────────

    /// Refresh the cached broker account list from the backend.
    pub async fn load_broker_accounts(&self) -> Result<(), CoreError> {
        self.gateway.load_accounts().await
    }

    /// Snapshot of all known broker accounts.
    #[must_use]
    pub fn broker_accounts(&self) -> Vec<BrokerAccount> {
        self.gateway.accounts()
    }

    /// Create and test a broker connection. Parameters are validated
    /// locally (field-level errors) before anything goes on the wire.
    pub async fn connect_broker(&self, params: &ConnectParams) -> Result<BrokerAccount, CoreError> {
        self.gateway.connect(params).await
    }

    /// Disconnect a broker account; removed locally only after the remote
    /// side confirms.
    pub async fn disconnect_broker(&self, account_id: i64) -> Result<(), CoreError> {
        self.gateway.disconnect(account_id).await
    }

    pub async fn connection_status(&self, account_id: i64) -> Result<ConnectionProbe, CoreError> {
        self.gateway.connection_status(account_id).await
    }

    /// Kick off a background data sync for one account.
    pub async fn sync_account(&self, account_id: i64) -> Result<SyncReceipt, CoreError> {
        self.gateway.sync(account_id).await
    }

    /// Re-sync an account in the error state; success reactivates it.
    pub async fn resync_account(&self, account_id: i64) -> Result<SyncReceipt, CoreError> {
        self.gateway.resync(account_id).await
    }

    /// True iff any broker account is currently active. Recomputed per
    /// call.
    #[must_use]
    pub fn is_broker_connected(&self) -> bool {
        self.gateway.has_active_connection()
    }

    /// Cash balance for an account (default: first active).
    pub async fn balance(&self, account_id: Option<i64>) -> Result<BrokerBalance, CoreError> {
        self.gateway.balance(account_id).await
    }

    // ── Reconciled data (live broker or mock fallback) ──────────────

    /// Portfolio holdings with provenance.
    pub async fn holdings(&self) -> Sourced<Vec<Holding>> {
        self.reconciliation.holdings().await
    }

    /// Trade journal with provenance.
    pub async fn trades(&self) -> Sourced<Vec<Trade>> {
        self.reconciliation.trades().await
    }

    /// Portfolio summary with provenance.
    pub async fn portfolio_summary(&self) -> Sourced<PortfolioSummary> {
        self.reconciliation.portfolio_summary().await
    }

    /// Journal win/loss statistics with provenance.
    pub async fn journal_stats(&self) -> Sourced<JournalStats> {
        self.reconciliation.journal_stats().await
    }

    /// Market scanner rows for a movement filter.
    pub fn scanners(&self, filter: ScannerFilter) -> Sourced<Vec<ScannerRow>> {
        self.reconciliation.scanners(filter)
    }

    /// Cumulative-profit analytics series.
    pub fn analytics(&self) -> Sourced<Vec<AnalyticsPoint>> {
        self.reconciliation.analytics()
    }

    /// One-off quote with provenance.
    pub async fn quote(&self, symbol: &str) -> Sourced<LiveQuote> {
        self.reconciliation.quote(symbol).await
    }

    // ── Live quote polling ──────────────────────────────────────────

    /// Start a periodic quote refresh (5 s period) for a symbol. The
    /// returned ticker stops the loop on [`QuoteTicker::stop`] or drop.
    pub fn start_quote_ticker<F>(&self, symbol: &str, on_quote: F) -> QuoteTicker
    where
        F: Fn(Sourced<LiveQuote>) + Send + Sync + 'static,
    {
        self.start_quote_ticker_with_period(symbol, QUOTE_REFRESH_PERIOD, on_quote)
    }

    /// Same as [`Self::start_quote_ticker`] with an explicit period.
    pub fn start_quote_ticker_with_period<F>(
        &self,
        symbol: &str,
        period: Duration,
        on_quote: F,
    ) -> QuoteTicker
    where
        F: Fn(Sourced<LiveQuote>) + Send + Sync + 'static,
    {
        QuoteTicker::start(Arc::clone(&self.reconciliation), symbol, period, on_quote)
    }

    // ── Internal access (advanced callers / tests) ──────────────────

    /// Direct access to the broker gateway.
    #[must_use]
    pub fn gateway(&self) -> &Arc<BrokerGateway> {
        &self.gateway
    }

    /// Direct access to the reconciliation layer.
    #[must_use]
    pub fn reconciliation(&self) -> &Arc<ReconciliationService> {
        &self.reconciliation
    }
}
