//! Error types for the persistence layer

use std::io;
use thiserror::Error;

/// Failures of a key-value store backend.
///
/// These never reach the user: reads fall back to defaults and failed writes
/// are logged while the countdown keeps running.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed store file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
