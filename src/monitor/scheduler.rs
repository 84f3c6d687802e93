use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::Monitor;

/// Fixed poll interval. Deliberately not runtime-configurable.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Drives periodic re-fetching: one fetch immediately on `start()`, then
/// one per interval until `stop()`. Each fetch runs in its own task so a
/// straggling request never delays the next tick; overlapping completions
/// are resolved by the state machine's sequence rule.
pub struct PollScheduler {
    monitor: Monitor,
    ticker: Option<JoinHandle<()>>,
}

impl PollScheduler {
    pub fn new(monitor: Monitor) -> Self {
        PollScheduler {
            monitor,
            ticker: None,
        }
    }

    /// Spawn the ticker task. Callers must pair this with `stop()`; a
    /// second `start()` without an intervening `stop()` is ignored.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            warn!("Poll scheduler already active, ignoring start()");
            return;
        }

        let monitor = self.monitor.clone();
        self.ticker = Some(tokio::spawn(async move {
            info!("Poll scheduler started (interval={:?})", POLL_INTERVAL);
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                // First tick completes immediately
                interval.tick().await;
                let monitor = monitor.clone();
                tokio::spawn(async move {
                    monitor.refresh().await;
                });
            }
        }));
    }

    /// Cancel the ticker. In-flight fetches are allowed to complete but
    /// their results are discarded by the stopped state machine.
    pub fn stop(&mut self) {
        self.monitor.stop();
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            info!("Poll scheduler stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.ticker.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::testing::{snapshot, FakeBackend};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test(start_paused = true)]
    async fn test_immediate_fetch_then_one_per_interval() {
        let backend = Arc::new(FakeBackend::new(vec![snapshot(1, false)]));
        let monitor = Monitor::new(backend.clone());
        let mut scheduler = PollScheduler::new(monitor.clone());

        scheduler.start();
        // 1 immediate + ticks at 10s, 20s, 30s
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(backend.fetches(), 4);

        let board = monitor.board();
        assert!(!board.loading);
        assert_eq!(board.live.len(), 1);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_future_ticks() {
        let backend = Arc::new(FakeBackend::new(vec![]));
        let monitor = Monitor::new(backend.clone());
        let mut scheduler = PollScheduler::new(monitor);

        scheduler.start();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(backend.fetches(), 1);

        scheduler.stop();
        assert!(!scheduler.is_active());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(backend.fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_discards_in_flight_fetch() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(FakeBackend::gated(vec![snapshot(1, false)], gate.clone()));
        let monitor = Monitor::new(backend.clone());
        let mut scheduler = PollScheduler::new(monitor.clone());

        scheduler.start();
        // Let the immediate fetch start and park on the gate
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(backend.fetches(), 1);

        scheduler.stop();

        // The in-flight fetch now resolves; its result must be discarded
        gate.notify_waiters();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let board = monitor.board();
        assert!(board.loading);
        assert!(board.live.is_empty());
        assert!(board.finished.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_ignored() {
        let backend = Arc::new(FakeBackend::new(vec![]));
        let monitor = Monitor::new(backend.clone());
        let mut scheduler = PollScheduler::new(monitor);

        scheduler.start();
        scheduler.start();

        // A duplicate ticker would double this count
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(backend.fetches(), 2);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_surfaces_without_dropping_data() {
        let backend = Arc::new(FakeBackend::new(vec![snapshot(1, false)]));
        let monitor = Monitor::new(backend.clone());
        let mut scheduler = PollScheduler::new(monitor.clone());

        scheduler.start();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(monitor.board().live.len(), 1);

        backend
            .fail_fetches
            .store(true, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let board = monitor.board();
        assert!(board.error.is_some());
        assert_eq!(board.live.len(), 1, "last-known-good data retained");

        backend
            .fail_fetches
            .store(false, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let board = monitor.board();
        assert!(board.error.is_none(), "banner cleared by next success");
        assert_eq!(board.live.len(), 1);

        scheduler.stop();
    }
}
