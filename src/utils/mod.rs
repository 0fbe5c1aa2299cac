//! Utility functions module
//!
//! Shutdown signal handling and duration formatting.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_clock, format_uptime};
pub use signals::shutdown_signal;
