//! Break Clock - A local countdown server for break and lunch timers
//!
//! This library provides a countdown engine with mutually exclusive break
//! and lunch timers, one-shot alarms, key-value persistence of the remaining
//! seconds and an HTTP control surface.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod ticker;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use tracker::{Outcome, TimeTracker, TrackerSettings};
pub use utils::signals::shutdown_signal;
