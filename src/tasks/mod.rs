//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod snapshot_logger;
pub mod tick_driver;

// Re-export main functions
pub use snapshot_logger::snapshot_logger_task;
pub use tick_driver::tick_driver_task;
