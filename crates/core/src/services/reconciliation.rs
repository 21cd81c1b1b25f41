use std::sync::Arc;

use tracing::warn;

use crate::models::analytics::{JournalStats, PortfolioSummary};
use crate::models::broker::LiveQuote;
use crate::models::holding::Holding;
use crate::models::market::{AnalyticsPoint, ScannerFilter, ScannerRow};
use crate::models::sourced::Sourced;
use crate::models::trade::Trade;
use crate::services::broker_gateway::BrokerGateway;
use crate::services::mock_catalog::MockCatalog;
use crate::services::stats;
use crate::transport::wire::{BrokerPosition, BrokerTrade};

/// Decides, per data category, whether to serve live broker data or the
/// mock catalog, normalizes broker-native records into canonical shapes,
/// and computes derived statistics.
///
/// Selection algorithm, per category and per call:
/// 1. Ask the gateway whether any broker connection is active.
/// 2. If not — serve the mock catalog, tagged `Mock`.
/// 3. If so — fetch from the gateway; on success normalize and tag `Live`;
///    on any failure log it and fall back to the mock catalog for this
///    category only. One category's fallback never blocks another's fetch.
///
/// Derived statistics always operate on the category result just obtained;
/// live and mock rows are never mixed inside one aggregate.
pub struct ReconciliationService {
    gateway: Arc<BrokerGateway>,
}

impl ReconciliationService {
    pub fn new(gateway: Arc<BrokerGateway>) -> Self {
        Self { gateway }
    }

    /// Portfolio holdings — live positions if a broker is connected,
    /// otherwise the mock set.
    pub async fn holdings(&self) -> Sourced<Vec<Holding>> {
        if !self.gateway.has_active_connection() {
            return Sourced::mock(MockCatalog::holdings());
        }
        match self.gateway.positions(None).await {
            Ok(positions) => {
                Sourced::live(positions.into_iter().map(normalize_position).collect())
            }
            Err(e) => {
                warn!(error = %e, "holdings fetch failed, serving mock data");
                Sourced::mock(MockCatalog::holdings())
            }
        }
    }

    /// Trade journal — live executions if a broker is connected,
    /// otherwise the mock set.
    pub async fn trades(&self) -> Sourced<Vec<Trade>> {
        if !self.gateway.has_active_connection() {
            return Sourced::mock(MockCatalog::trades());
        }
        match self.gateway.trades(None).await {
            Ok(trades) => Sourced::live(trades.into_iter().map(normalize_trade).collect()),
            Err(e) => {
                warn!(error = %e, "trades fetch failed, serving mock data");
                Sourced::mock(MockCatalog::trades())
            }
        }
    }

    /// Aggregate portfolio summary.
    ///
    /// For a live summary the win rate is computed from live trades when
    /// that call succeeds and is 0 when it fails — mock trades are never
    /// folded into a live aggregate.
    pub async fn portfolio_summary(&self) -> Sourced<PortfolioSummary> {
        if !self.gateway.has_active_connection() {
            return Sourced::mock(MockCatalog::portfolio_summary());
        }
        match self.gateway.portfolio_summary(None).await {
            Ok(summary) => {
                let win_rate = match self.gateway.trades(None).await {
                    Ok(trades) => {
                        let normalized: Vec<Trade> =
                            trades.into_iter().map(normalize_trade).collect();
                        stats::journal_stats(&normalized).win_rate
                    }
                    Err(e) => {
                        warn!(error = %e, "trades fetch for win rate failed, reporting 0");
                        0.0
                    }
                };
                Sourced::live(PortfolioSummary {
                    total_value: summary.total_value,
                    total_pl: summary.total_pnl,
                    pl_percent: summary.total_pnl_percent,
                    holdings: summary.positions_count,
                    win_rate,
                })
            }
            Err(e) => {
                warn!(error = %e, "portfolio summary fetch failed, serving mock data");
                Sourced::mock(MockCatalog::portfolio_summary())
            }
        }
    }

    /// Journal statistics, computed from whichever trade set the
    /// reconciliation just selected. Provenance follows the trades.
    pub async fn journal_stats(&self) -> Sourced<JournalStats> {
        self.trades().await.map(|trades| stats::journal_stats(&trades))
    }

    /// Scanner rows for a movement filter. No scanner backend exists yet,
    /// so this is always mock-sourced. Filtering never mutates the
    /// underlying catalog.
    pub fn scanners(&self, filter: ScannerFilter) -> Sourced<Vec<ScannerRow>> {
        Sourced::mock(stats::filter_scanners(&MockCatalog::scanners(), filter))
    }

    /// Cumulative-profit time series. Always mock-sourced until an
    /// analytics backend exists.
    pub fn analytics(&self) -> Sourced<Vec<AnalyticsPoint>> {
        Sourced::mock(MockCatalog::analytics())
    }

    /// Point-in-time quote. The gateway reports failures; substituting the
    /// placeholder quote happens here, tagged `Mock`, so the ticker never
    /// surfaces an error to the user.
    pub async fn quote(&self, symbol: &str) -> Sourced<LiveQuote> {
        if !self.gateway.has_active_connection() {
            return Sourced::mock(MockCatalog::quote(symbol));
        }
        match self.gateway.quote(symbol).await {
            Ok(quote) => Sourced::live(quote),
            Err(e) => {
                warn!(symbol, error = %e, "quote fetch failed, serving mock quote");
                Sourced::mock(MockCatalog::quote(symbol))
            }
        }
    }
}

/// Normalize a broker position into the canonical holding shape
/// (`avg_price` → avg price, `market_value` → value, `unrealized_pnl` → pl).
fn normalize_position(pos: BrokerPosition) -> Holding {
    Holding {
        symbol: pos.symbol,
        quantity: pos.quantity,
        avg_price: pos.avg_price,
        current_price: pos.current_price,
        value: pos.market_value,
        pl: pos.unrealized_pnl,
        pl_percent: pos.unrealized_pnl_percent,
    }
}

/// Normalize a single broker execution into a journal trade.
///
/// Executions arrive unpaired, so exit price mirrors entry price and
/// profit is 0 until a closing leg can be matched (documented limitation).
fn normalize_trade(trade: BrokerTrade) -> Trade {
    Trade {
        id: trade.id.map(|id| id.to_string()).unwrap_or_default(),
        symbol: trade.symbol,
        side: trade.side,
        quantity: trade.quantity,
        entry_price: trade.price,
        exit_price: trade.price,
        date: trade.execution_time.date_naive(),
        profit: 0.0,
        profit_percent: 0.0,
    }
}
