// Location log store - Append-only persisted list of location samples
use crate::application::storage_port::KeyValueStorage;
use crate::domain::location::LocationPoint;
use crate::error::LogError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_STORAGE_KEY: &str = "wander-location-history";

/// The full location log, stored as one JSON array under a single key
///
/// Every append rewrites the whole collection. Writers are serialized through
/// an internal lock so concurrent appends cannot drop each other's points
pub struct LocationLogStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    write_lock: Mutex<()>,
}

impl LocationLogStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a point to the end of the log. Field ranges are not validated
    pub fn append(&self, point: LocationPoint) -> Result<(), LogError> {
        let _guard = self.lock();
        let mut history = self.read_all()?;
        history.push(point);
        self.write(&history, "append")
    }

    /// All stored points in append order
    ///
    /// A missing or malformed payload reads as an empty log; only a failing
    /// storage backend is reported
    pub fn read_all(&self) -> Result<Vec<LocationPoint>, LogError> {
        let stored = self.storage.get(&self.key).map_err(LogError::storage("read"))?;

        let Some(payload) = stored else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<LocationPoint>>(&payload) {
            Ok(points) => {
                tracing::debug!("Read {} locations from '{}'", points.len(), self.key);
                Ok(points)
            }
            Err(e) => {
                tracing::warn!("Error parsing location history under '{}': {}", self.key, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn is_empty(&self) -> Result<bool, LogError> {
        Ok(self.read_all()?.is_empty())
    }

    /// Remove the persisted log entirely
    pub fn clear(&self) -> Result<(), LogError> {
        let _guard = self.lock();
        self.storage
            .remove(&self.key)
            .map_err(LogError::storage("clear"))?;
        tracing::info!("Cleared location history '{}'", self.key);
        Ok(())
    }

    /// Write `points` as the whole log, but only while the log is still empty.
    /// Returns false and leaves storage untouched when anything was recorded
    #[cfg_attr(not(any(test, feature = "mock-data")), allow(dead_code))]
    pub(crate) fn replace_if_empty(&self, points: &[LocationPoint]) -> Result<bool, LogError> {
        let _guard = self.lock();
        if !self.read_all()?.is_empty() {
            return Ok(false);
        }
        self.write(points, "replace")?;
        Ok(true)
    }

    fn write(&self, points: &[LocationPoint], operation: &'static str) -> Result<(), LogError> {
        let payload = serde_json::to_string(points)?;
        self.storage
            .set(&self.key, &payload)
            .map_err(LogError::storage(operation))?;
        tracing::debug!(
            "Wrote {} locations ({} bytes) to '{}'",
            points.len(),
            payload.len(),
            self.key
        );
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded section holds no state of its own, so a poisoned lock is still usable
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
