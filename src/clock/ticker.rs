//! Tokio-backed tick delivery.

use super::{ClockToken, TickScheduler};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, instrument};

/// Delivers ticks on a background tokio task.
///
/// Scheduling a new token aborts the task for the previous one. A tick the
/// old task already sent is still rejected by the clock's token check.
pub struct Ticker {
    period: Duration,
    deliver: Arc<dyn Fn(ClockToken) -> bool + Send + Sync>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Creates a ticker that hands each tick to `deliver`.
    ///
    /// `deliver` returns false once nobody is listening, which stops the task.
    pub fn new<F>(period: Duration, deliver: F) -> Self
    where
        F: Fn(ClockToken) -> bool + Send + Sync + 'static,
    {
        Self {
            period,
            deliver: Arc::new(deliver),
            task: None,
        }
    }

    /// True while a tick task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl TickScheduler for Ticker {
    #[instrument(skip(self), fields(generation = token.generation()))]
    fn schedule(&mut self, token: ClockToken) {
        self.cancel();

        let period = self.period;
        let deliver = Arc::clone(&self.deliver);
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !deliver(token) {
                    debug!("Tick receiver gone, stopping ticker");
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_delivers_one_tick_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new(Duration::from_secs(1), move |t| tx.send(t).is_ok());

        let token = ClockToken(7);
        ticker.schedule(token);
        assert_eq!(rx.recv().await, Some(token));
        assert_eq!(rx.recv().await, Some(token));
        ticker.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_old_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new(Duration::from_secs(1), move |t| tx.send(t).is_ok());

        ticker.schedule(ClockToken(1));
        ticker.schedule(ClockToken(2));

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(ClockToken(2)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new(Duration::from_secs(1), move |t| tx.send(t).is_ok());

        ticker.schedule(ClockToken(1));
        ticker.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert!(!ticker.is_running());
    }
}
