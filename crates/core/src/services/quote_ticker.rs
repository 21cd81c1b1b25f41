use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::broker::LiveQuote;
use crate::models::sourced::Sourced;
use crate::services::reconciliation::ReconciliationService;

/// Default refresh period for live quotes.
pub const QUOTE_REFRESH_PERIOD: Duration = Duration::from_secs(5);

/// Periodic quote refresh task.
///
/// Polls the reconciliation layer on a fixed period and hands each result
/// to the callback — an immediate first tick, then one per period, which
/// is the contract a future push-based transport must also satisfy.
/// Cancellation is deterministic: after [`QuoteTicker::stop`] (or drop) no
/// further callbacks fire, so navigating away from a view cannot leave an
/// orphaned fetch loop behind.
pub struct QuoteTicker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl QuoteTicker {
    /// Spawn the refresh loop. Must be called from within a tokio runtime.
    pub fn start<F>(
        service: Arc<ReconciliationService>,
        symbol: impl Into<String>,
        period: Duration,
        on_quote: F,
    ) -> Self
    where
        F: Fn(Sourced<LiveQuote>) + Send + Sync + 'static,
    {
        let (shutdown, mut stopped) = watch::channel(false);
        let symbol = symbol.into();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let quote = service.quote(&symbol).await;
                        on_quote(quote);
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            debug!(symbol, "quote ticker stopped");
                            break;
                        }
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Stop the refresh loop. Idempotent.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
        self.handle.abort();
    }

    /// Whether the background task has fully terminated.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for QuoteTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
