//! Error types for Custodian
//!
//! Library errors use `thiserror`; the CLI wraps them with `anyhow`.
//!
//! The failure contract is asymmetric on purpose: corrupted *reads* are
//! recovered inside the store and never surface here, while *write* and
//! *restore* failures always do.

use thiserror::Error;

/// Result type alias for store write paths
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for repository mutations
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors on the store's write path (save, reset, persisted imports)
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing medium is out of capacity
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// The backing medium failed for a non-capacity reason
    #[error("storage failure while writing '{key}': {message}")]
    Backend { key: String, message: String },

    /// Snapshot could not be serialized
    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised when a backup payload is rejected
///
/// Restore is all-or-nothing: any of these leaves the store untouched.
#[derive(Error, Debug)]
pub enum RestoreError {
    /// Payload is not parseable JSON
    #[error("backup payload is not valid JSON: {0}")]
    Malformed(String),

    /// Payload parses but lacks the backup markers
    #[error("payload is not a custodian backup (missing version/backupId/backupDate)")]
    NotABackup,

    /// Backup was produced by an incompatible format version
    #[error("unsupported backup version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Collection payload does not match the recorded digest
    #[error("backup integrity check failed: digest mismatch")]
    DigestMismatch,

    /// Writing the restored snapshot failed
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Errors from repository mutations
#[derive(Error, Debug)]
pub enum RepoError {
    /// Update/delete addressed an id that is not in the collection
    #[error("no {collection} record with id '{id}'")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    /// The underlying write failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors loading the TOML configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// No platform data directory to fall back to
    #[error("could not resolve a platform data directory; set data_dir in custodian.toml")]
    NoDataDir,
}

impl StoreError {
    /// True when the failure was a capacity problem the caller may retry
    /// after freeing space
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_error_display_names_the_key() {
        let err = StoreError::QuotaExceeded {
            key: "custodian.controls".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded while writing 'custodian.controls'"
        );
        assert!(err.is_quota_exceeded());
    }

    #[test]
    fn not_found_display_names_collection_and_id() {
        let err = RepoError::NotFound {
            collection: "policy",
            id: "p-42".to_string(),
        };
        assert_eq!(err.to_string(), "no policy record with id 'p-42'");
    }

    #[test]
    fn restore_version_mismatch_display() {
        let err = RestoreError::UnsupportedVersion {
            found: 99,
            expected: 1,
        };
        assert!(err.to_string().contains("99"));
        assert!(err.to_string().contains("expected 1"));
    }
}
