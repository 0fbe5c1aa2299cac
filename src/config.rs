//! Configuration and CLI argument handling

use clap::Parser;
use std::path::PathBuf;

use crate::{
    services::{DEFAULT_ALARM_SOUND, DEFAULT_PLAYER},
    tracker::TrackerSettings,
};

/// Longest break or lunch baseline accepted on the command line: one day
pub const MAX_BASELINE_MINUTES: u64 = 24 * 60;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "break-clock")]
#[command(about = "A local countdown server for break and lunch timers with one-shot alarms")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file the remaining break and lunch seconds are kept in
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Keep counters in memory only
    #[arg(long, conflicts_with = "store")]
    pub ephemeral: bool,

    /// Sound resource handed to the player when an alarm expires
    #[arg(long, default_value = DEFAULT_ALARM_SOUND)]
    pub sound: String,

    /// Player command line; the sound resource is appended as last argument
    #[arg(long, default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// Log alarm expiry instead of playing a sound
    #[arg(long)]
    pub mute: bool,

    /// Break baseline restored by reset, in minutes (1-1440)
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=MAX_BASELINE_MINUTES))]
    pub break_minutes: u64,

    /// Lunch baseline restored by reset, in minutes (1-1440)
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..=MAX_BASELINE_MINUTES))]
    pub lunch_minutes: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Store location, `None` when running ephemeral or without a data dir
    pub fn store_path(&self) -> Option<PathBuf> {
        if self.ephemeral {
            return None;
        }
        self.store
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("break-clock").join("store.json")))
    }

    pub fn settings(&self) -> TrackerSettings {
        TrackerSettings {
            break_seconds: self.break_minutes * 60,
            lunch_seconds: self.lunch_minutes * 60,
        }
    }
}
