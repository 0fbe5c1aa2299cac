//! External side effects module
//!
//! Alarm playback is the only effect the tracker has outside its own state.

pub mod playback;

// Re-export main types
pub use playback::*;
