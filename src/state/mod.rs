//! State management module
//!
//! Countdown slots, their serializable snapshots and the shared server state.

pub mod app_state;
pub mod counter;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use counter::{
    AlarmPreset, Countdown, CounterKind, CounterPhase, BREAK_KEY, DEFAULT_BREAK_SECONDS,
    DEFAULT_LUNCH_SECONDS, LUNCH_KEY,
};
pub use snapshot::{CounterSnapshot, TrackerSnapshot};
