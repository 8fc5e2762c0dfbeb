// Error types for the location history core
use thiserror::Error;

/// Failure reported by a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to callers of the location log and its grouped views
///
/// A payload that fails to deserialize is never an error: it reads as an
/// empty log
#[derive(Debug, Error)]
pub enum LogError {
    #[error("location history storage unavailable during {operation}: {source}")]
    StorageUnavailable {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to encode location history: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LogError {
    pub(crate) fn storage(operation: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| LogError::StorageUnavailable { operation, source }
    }
}
