//! Key-value persistence module
//!
//! Counters persist their remaining seconds through an injected store so the
//! countdown engine never depends on a concrete backend.

pub mod json_file;
pub mod memory;

use tracing::{debug, warn};

use crate::error::StoreResult;

// Re-export main types
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// String-keyed storage capability that survives restarts
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Return the integer stored under `key`, or `fallback` if it is absent,
/// unparsable or unreadable.
pub fn load_default(store: &dyn KeyValueStore, key: &str, fallback: u64) -> u64 {
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim().parse::<u64>() {
            Ok(value) => {
                debug!("Restored {}={} from store", key, value);
                value
            }
            Err(_) => {
                warn!("Ignoring unparsable value {:?} for {}, using {}", raw, key, fallback);
                fallback
            }
        },
        Ok(None) => fallback,
        Err(e) => {
            warn!("Failed to read {} from store: {}, using {}", key, e, fallback);
            fallback
        }
    }
}

/// Persist `value` under `key`. Last write wins; failures are only logged.
pub fn save(store: &dyn KeyValueStore, key: &str, value: u64) {
    if let Err(e) = store.set(key, &value.to_string()) {
        warn!("Failed to persist {}={}: {}", key, value, e);
    }
}
