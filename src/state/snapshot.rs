//! Serializable views of the tracker, handed to observers and the API

use serde::{Deserialize, Serialize};

use super::{Countdown, CounterKind, CounterPhase};
use crate::utils::format_clock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub kind: CounterKind,
    pub remaining_seconds: u64,
    /// Upper bound of `remaining_seconds` for the current value
    pub initial_seconds: u64,
    /// `m:ss`, e.g. `25:00`
    pub display: String,
    pub active: bool,
    pub phase: CounterPhase,
    pub can_start: bool,
    pub can_pause: bool,
}

impl From<&Countdown> for CounterSnapshot {
    fn from(countdown: &Countdown) -> Self {
        Self {
            kind: countdown.kind(),
            remaining_seconds: countdown.remaining_seconds(),
            initial_seconds: countdown.initial_seconds(),
            display: format_clock(countdown.remaining_seconds()),
            active: countdown.is_active(),
            phase: countdown.phase(),
            can_start: countdown.can_start(),
            can_pause: countdown.can_pause(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    #[serde(rename = "break")]
    pub break_time: CounterSnapshot,
    #[serde(rename = "lunch")]
    pub lunch_time: CounterSnapshot,
    pub alarm: CounterSnapshot,
}

impl TrackerSnapshot {
    pub fn counter(&self, kind: CounterKind) -> &CounterSnapshot {
        match kind {
            CounterKind::Break => &self.break_time,
            CounterKind::Lunch => &self.lunch_time,
            CounterKind::Alarm => &self.alarm,
        }
    }
}
