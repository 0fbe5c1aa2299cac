//! One-second tick scheduling
//!
//! A running counter owns exactly one [`TickGuard`]. Tick tasks never touch
//! tracker state; they only forward [`TickEvent`]s to the tick driver.

use std::{fmt, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::debug;

use crate::state::CounterKind;

/// Cadence of every countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One tick for one run of a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub kind: CounterKind,
    /// Run number the tick was scheduled for, see `Countdown::run`
    pub run: u64,
}

/// Source of recurring ticks
pub trait TickScheduler: Send + Sync {
    /// Begin ticking `event` every period until the returned guard is released
    fn schedule(&self, event: TickEvent) -> TickGuard;
}

/// Live recurring tick. Releasing it (drop or `cancel`) stops the ticks.
pub struct TickGuard {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickGuard {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Guard that aborts a spawned tick task
    pub fn from_task(handle: JoinHandle<()>) -> Self {
        Self::new(move || handle.abort())
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for TickGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickGuard")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler that spawns a tokio interval task per running counter and
/// forwards its ticks over an unbounded channel.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    tx: mpsc::UnboundedSender<TickEvent>,
    period: Duration,
}

impl IntervalScheduler {
    /// Create a one-second scheduler and the receiving end for the tick driver
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, period }, rx)
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule(&self, event: TickEvent) -> TickGuard {
        let tx = self.tx.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            // No catch-up after a stall; drift is fine
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(event).is_err() {
                    debug!("Tick receiver gone, stopping {} ticks", event.kind);
                    break;
                }
            }
        });

        debug!("Scheduled {} ticks for run {}", event.kind, event.run);
        TickGuard::from_task(handle)
    }
}
