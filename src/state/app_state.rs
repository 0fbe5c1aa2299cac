//! Shared application state for the server and background tasks

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

use super::{AlarmPreset, CounterKind, TrackerSnapshot};
use crate::{
    ticker::TickEvent,
    tracker::{Outcome, TimeTracker},
    utils::format_uptime,
};

/// Main application state wrapping the countdown engine
pub struct AppState {
    /// Countdown engine; every transition happens under this lock
    tracker: Mutex<TimeTracker>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last applied user action
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(port: u16, host: String, tracker: TimeTracker) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn lock_tracker(&self) -> Result<MutexGuard<'_, TimeTracker>, String> {
        self.tracker
            .lock()
            .map_err(|e| format!("Failed to lock tracker: {}", e))
    }

    /// Run a user action against the tracker and record it when it applied
    pub fn apply<F>(&self, action: &str, updater: F) -> Result<(Outcome, TrackerSnapshot), String>
    where
        F: FnOnce(&mut TimeTracker) -> Outcome,
    {
        let mut tracker = self.lock_tracker()?;
        let outcome = updater(&mut tracker);
        let snapshot = tracker.snapshot();
        drop(tracker);

        if outcome == Outcome::Applied {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some((action.to_string(), Utc::now()));
            }
        }

        Ok((outcome, snapshot))
    }

    pub fn start(&self, kind: CounterKind) -> Result<(Outcome, TrackerSnapshot), String> {
        self.apply(&format!("{}-start", kind), |tracker| tracker.start(kind))
    }

    pub fn pause(&self, kind: CounterKind) -> Result<(Outcome, TrackerSnapshot), String> {
        self.apply(&format!("{}-pause", kind), |tracker| tracker.pause(kind))
    }

    pub fn reset(&self) -> Result<(Outcome, TrackerSnapshot), String> {
        self.apply("reset", TimeTracker::reset)
    }

    pub fn arm_alarm(&self, preset: AlarmPreset) -> Result<(Outcome, TrackerSnapshot), String> {
        self.apply(&format!("alarm-{}", preset.minutes()), |tracker| {
            tracker.arm_alarm(preset)
        })
    }

    /// Feed a scheduled tick to the tracker; ticks are not user actions
    pub fn on_tick(&self, event: TickEvent) -> Result<Outcome, String> {
        Ok(self.lock_tracker()?.on_tick(event))
    }

    pub fn snapshot(&self) -> Result<TrackerSnapshot, String> {
        Ok(self.lock_tracker()?.snapshot())
    }

    pub fn subscribe(&self) -> Result<watch::Receiver<TrackerSnapshot>, String> {
        Ok(self.lock_tracker()?.subscribe())
    }

    /// Cancel every live tick handle
    pub fn shutdown(&self) -> Result<(), String> {
        self.lock_tracker()?.shutdown();
        info!("All countdowns stopped");
        Ok(())
    }

    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }
}
