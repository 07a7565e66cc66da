//! In-memory backend
//!
//! Mirrors the semantics of a browser-style key-value store, including
//! an optional byte quota so tests can exercise storage exhaustion.

use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::ports::{BackendError, BackendResult, StorageBackend};

/// Quota-aware in-memory key-value medium
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
    /// Total byte budget across keys and values; `None` = unlimited
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    /// Unlimited in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects writes once keys + values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            quota_bytes: Some(bytes),
        }
    }

    /// Bytes currently stored (keys + values)
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Overwrite a raw value, bypassing the quota. Test hook for
    /// planting corrupted documents.
    pub fn plant(&self, key: &str, value: &str) {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> BackendResult<()> {
        let mut entries = self.entries.write();
        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(BackendError::QuotaExceeded);
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
