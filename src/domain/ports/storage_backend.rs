//! StorageBackend port - abstraction over the local key-value medium
//!
//! This trait lets the store own serialization without knowing whether
//! the medium is a directory of files, a browser-style quota-limited
//! map, or a test double.

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend operation errors
#[derive(Debug)]
pub enum BackendError {
    /// The medium has no room for the value
    QuotaExceeded,
    /// Any other medium failure
    Io(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::QuotaExceeded => write!(f, "storage quota exceeded"),
            BackendError::Io(msg) => write!(f, "storage I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Abstract local key-value medium
///
/// Keys are flat strings (`custodian.controls`); values are serialized
/// JSON documents. Implemented by the infrastructure layer.
pub trait StorageBackend: Send + Sync {
    /// Read the value under `key`; `Ok(None)` when the key is absent
    fn read(&self, key: &str) -> BackendResult<Option<String>>;

    /// Write `value` under `key`, creating or replacing it
    fn write(&self, key: &str, value: &str) -> BackendResult<()>;

    /// Remove `key` if present; absent keys are not an error
    fn remove(&self, key: &str) -> BackendResult<()>;
}
