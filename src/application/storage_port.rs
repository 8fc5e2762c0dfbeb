// Storage port for the persisted location log
use crate::error::StorageError;

/// A key-value store holding opaque string payloads, in the manner of a
/// browser's local storage
pub trait KeyValueStorage: Send + Sync {
    /// Returns `None` when nothing is stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key succeeds
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
