//! Countdown engine for the break, lunch and alarm slots
//!
//! All transitions go through `&mut TimeTracker`, so they are serialized by
//! whoever owns the tracker. Guards that do not hold (starting a running or
//! exhausted counter, pausing an idle one) are ignored, never reported as
//! errors.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    services::AlarmPlayer,
    state::{
        AlarmPreset, Countdown, CounterKind, TrackerSnapshot, BREAK_KEY, DEFAULT_BREAK_SECONDS,
        DEFAULT_LUNCH_SECONDS, LUNCH_KEY,
    },
    storage::{self, KeyValueStore},
    ticker::{TickEvent, TickScheduler},
};

/// Baseline durations restored by `reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    pub break_seconds: u64,
    pub lunch_seconds: u64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            break_seconds: DEFAULT_BREAK_SECONDS,
            lunch_seconds: DEFAULT_LUNCH_SECONDS,
        }
    }
}

/// Whether a user action or tick changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Applied,
    Ignored,
}

pub struct TimeTracker {
    settings: TrackerSettings,
    break_counter: Countdown,
    lunch_counter: Countdown,
    alarm_counter: Countdown,
    store: Arc<dyn KeyValueStore>,
    player: Arc<dyn AlarmPlayer>,
    scheduler: Arc<dyn TickScheduler>,
    updates: watch::Sender<TrackerSnapshot>,
}

impl TimeTracker {
    /// Build the tracker with break and lunch restored from `store`
    pub fn restore(
        settings: TrackerSettings,
        store: Arc<dyn KeyValueStore>,
        player: Arc<dyn AlarmPlayer>,
        scheduler: Arc<dyn TickScheduler>,
    ) -> Self {
        let break_seconds = storage::load_default(store.as_ref(), BREAK_KEY, settings.break_seconds);
        let lunch_seconds = storage::load_default(store.as_ref(), LUNCH_KEY, settings.lunch_seconds);
        info!("Restored break={}s lunch={}s", break_seconds, lunch_seconds);

        let break_counter = Countdown::new(CounterKind::Break, break_seconds);
        let lunch_counter = Countdown::new(CounterKind::Lunch, lunch_seconds);
        let alarm_counter = Countdown::new(CounterKind::Alarm, 0);
        let (updates, _) = watch::channel(TrackerSnapshot {
            break_time: (&break_counter).into(),
            lunch_time: (&lunch_counter).into(),
            alarm: (&alarm_counter).into(),
        });

        Self {
            settings,
            break_counter,
            lunch_counter,
            alarm_counter,
            store,
            player,
            scheduler,
            updates,
        }
    }

    pub fn counter(&self, kind: CounterKind) -> &Countdown {
        match kind {
            CounterKind::Break => &self.break_counter,
            CounterKind::Lunch => &self.lunch_counter,
            CounterKind::Alarm => &self.alarm_counter,
        }
    }

    fn counter_mut(&mut self, kind: CounterKind) -> &mut Countdown {
        match kind {
            CounterKind::Break => &mut self.break_counter,
            CounterKind::Lunch => &mut self.lunch_counter,
            CounterKind::Alarm => &mut self.alarm_counter,
        }
    }

    /// Start ticking `kind`, pausing its exclusive peer first
    pub fn start(&mut self, kind: CounterKind) -> Outcome {
        if !self.counter(kind).can_start() {
            debug!(
                "Ignoring start of {} (active={}, remaining={})",
                kind,
                self.counter(kind).is_active(),
                self.counter(kind).remaining_seconds()
            );
            return Outcome::Ignored;
        }

        if let Some(peer) = kind.exclusive_peer() {
            if self.counter_mut(peer).deactivate() {
                info!("Paused {} countdown to start {}", peer, kind);
            }
        }

        let run = self.counter_mut(kind).next_run();
        let guard = self.scheduler.schedule(TickEvent { kind, run });
        self.counter_mut(kind).activate(guard);

        info!(
            "Started {} countdown at {}s",
            kind,
            self.counter(kind).remaining_seconds()
        );
        self.publish();
        Outcome::Applied
    }

    pub fn pause(&mut self, kind: CounterKind) -> Outcome {
        if !self.counter_mut(kind).deactivate() {
            debug!("Ignoring pause of inactive {} countdown", kind);
            return Outcome::Ignored;
        }

        info!(
            "Paused {} countdown at {}s",
            kind,
            self.counter(kind).remaining_seconds()
        );
        self.publish();
        Outcome::Applied
    }

    /// Apply a scheduled tick if it belongs to the counter's live run
    pub fn on_tick(&mut self, event: TickEvent) -> Outcome {
        if self.counter(event.kind).run() != event.run {
            debug!("Dropping stale {} tick for run {}", event.kind, event.run);
            return Outcome::Ignored;
        }
        self.tick(event.kind)
    }

    /// Count `kind` down by one second
    pub fn tick(&mut self, kind: CounterKind) -> Outcome {
        let Some(remaining) = self.counter_mut(kind).decrement() else {
            return Outcome::Ignored;
        };

        if let Some(key) = kind.storage_key() {
            storage::save(self.store.as_ref(), key, remaining);
        }

        if remaining == 0 {
            info!("{} countdown expired", kind);
            if kind == CounterKind::Alarm {
                self.player.play();
            }
        } else {
            debug!("{} countdown at {}s", kind, remaining);
        }

        self.publish();
        Outcome::Applied
    }

    /// Pause break and lunch and restore both baselines
    pub fn reset(&mut self) -> Outcome {
        self.break_counter.deactivate();
        self.lunch_counter.deactivate();

        self.break_counter.load(self.settings.break_seconds);
        self.lunch_counter.load(self.settings.lunch_seconds);
        storage::save(self.store.as_ref(), BREAK_KEY, self.settings.break_seconds);
        storage::save(self.store.as_ref(), LUNCH_KEY, self.settings.lunch_seconds);

        info!(
            "Reset break to {}s and lunch to {}s",
            self.settings.break_seconds, self.settings.lunch_seconds
        );
        self.publish();
        Outcome::Applied
    }

    /// Arm the one-shot alarm, replacing any alarm still counting down
    pub fn arm_alarm(&mut self, preset: AlarmPreset) -> Outcome {
        if self.alarm_counter.deactivate() {
            info!("Replacing running alarm");
        }
        self.alarm_counter.load(preset.seconds());
        self.start(CounterKind::Alarm)
    }

    /// Release every live tick handle
    pub fn shutdown(&mut self) {
        let mut released = 0;
        for kind in [CounterKind::Break, CounterKind::Lunch, CounterKind::Alarm] {
            if self.counter_mut(kind).deactivate() {
                released += 1;
            }
        }
        info!("Tracker shut down, released {} tick handles", released);
        self.publish();
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            break_time: (&self.break_counter).into(),
            lunch_time: (&self.lunch_counter).into(),
            alarm: (&self.alarm_counter).into(),
        }
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<TrackerSnapshot> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }
}
