//! Countdown slots and their per-slot state machine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ticker::TickGuard;

/// Storage key of the break countdown
pub const BREAK_KEY: &str = "breakTime";
/// Storage key of the lunch countdown
pub const LUNCH_KEY: &str = "lunchTime";

pub const DEFAULT_BREAK_SECONDS: u64 = 25 * 60;
pub const DEFAULT_LUNCH_SECONDS: u64 = 60 * 60;

/// The three countdown slots of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    Break,
    Lunch,
    Alarm,
}

impl CounterKind {
    pub fn name(self) -> &'static str {
        match self {
            CounterKind::Break => "break",
            CounterKind::Lunch => "lunch",
            CounterKind::Alarm => "alarm",
        }
    }

    /// Key the remaining seconds are persisted under; the alarm is not persisted
    pub fn storage_key(self) -> Option<&'static str> {
        match self {
            CounterKind::Break => Some(BREAK_KEY),
            CounterKind::Lunch => Some(LUNCH_KEY),
            CounterKind::Alarm => None,
        }
    }

    /// Counter that must be paused before this one starts
    pub fn exclusive_peer(self) -> Option<CounterKind> {
        match self {
            CounterKind::Break => Some(CounterKind::Lunch),
            CounterKind::Lunch => Some(CounterKind::Break),
            CounterKind::Alarm => None,
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterPhase {
    Idle,
    Running,
    Expired,
}

/// Fixed alarm durations offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmPreset {
    Five,
    Ten,
    Fifteen,
}

impl AlarmPreset {
    pub const ALL: [AlarmPreset; 3] = [AlarmPreset::Five, AlarmPreset::Ten, AlarmPreset::Fifteen];

    pub fn from_minutes(minutes: u64) -> Option<Self> {
        match minutes {
            5 => Some(AlarmPreset::Five),
            10 => Some(AlarmPreset::Ten),
            15 => Some(AlarmPreset::Fifteen),
            _ => None,
        }
    }

    pub fn minutes(self) -> u64 {
        match self {
            AlarmPreset::Five => 5,
            AlarmPreset::Ten => 10,
            AlarmPreset::Fifteen => 15,
        }
    }

    pub fn seconds(self) -> u64 {
        self.minutes() * 60
    }
}

/// One countdown slot.
///
/// `remaining_seconds` stays within `[0, initial_seconds]`. While active the
/// slot owns the only tick guard for its counter.
#[derive(Debug)]
pub struct Countdown {
    kind: CounterKind,
    remaining_seconds: u64,
    initial_seconds: u64,
    active: bool,
    run: u64,
    guard: Option<TickGuard>,
}

impl Countdown {
    pub fn new(kind: CounterKind, seconds: u64) -> Self {
        Self {
            kind,
            remaining_seconds: seconds,
            initial_seconds: seconds,
            active: false,
            run: 0,
            guard: None,
        }
    }

    pub fn kind(&self) -> CounterKind {
        self.kind
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn initial_seconds(&self) -> u64 {
        self.initial_seconds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of the current (or last) run; bumped on every start
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn has_live_tick(&self) -> bool {
        self.guard.is_some()
    }

    pub fn phase(&self) -> CounterPhase {
        if self.active {
            CounterPhase::Running
        } else if self.remaining_seconds == 0 {
            CounterPhase::Expired
        } else {
            CounterPhase::Idle
        }
    }

    pub fn can_start(&self) -> bool {
        !self.active && self.remaining_seconds > 0
    }

    pub fn can_pause(&self) -> bool {
        self.active
    }

    /// Replace the value of an inactive counter, making it the new upper bound
    pub(crate) fn load(&mut self, seconds: u64) {
        debug_assert!(!self.active, "load on a running counter");
        self.remaining_seconds = seconds;
        self.initial_seconds = seconds;
    }

    pub(crate) fn next_run(&mut self) -> u64 {
        self.run += 1;
        self.run
    }

    pub(crate) fn activate(&mut self, guard: TickGuard) {
        debug_assert!(self.guard.is_none(), "second tick guard for one counter");
        self.active = true;
        self.guard = Some(guard);
    }

    /// Release the tick guard and go inactive. Returns whether it was running.
    pub(crate) fn deactivate(&mut self) -> bool {
        if let Some(guard) = self.guard.take() {
            guard.cancel();
        }
        std::mem::replace(&mut self.active, false)
    }

    /// Count one second down. `None` when inactive; on reaching zero the
    /// counter deactivates itself.
    pub(crate) fn decrement(&mut self) -> Option<u64> {
        if !self.active {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.deactivate();
        }
        Some(self.remaining_seconds)
    }
}
