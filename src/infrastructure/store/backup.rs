//! Backup and restore
//!
//! A backup is a versioned, self-describing JSON envelope holding every
//! collection plus a sha256 digest of the collection payload. Restore
//! is all-or-nothing: any rejected payload leaves the store untouched,
//! and an accepted one replaces every collection atomically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::entities::Snapshot;
use crate::error::{RestoreError, StoreResult};

use super::DataStore;

/// Current backup format version
pub const BACKUP_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct BackupEnvelope {
    version: u32,
    backup_id: String,
    backup_date: DateTime<Utc>,
    digest: String,
    #[serde(flatten)]
    data: Snapshot,
}

fn snapshot_digest(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_string(snapshot)?;
    Ok(format!("sha256:{:x}", Sha256::digest(canonical.as_bytes())))
}

impl DataStore {
    /// Serialize the whole store into a self-describing backup document
    pub fn create_backup(&self) -> StoreResult<String> {
        let data = self.snapshot();
        let envelope = BackupEnvelope {
            version: BACKUP_VERSION,
            backup_id: uuid::Uuid::new_v4().to_string(),
            backup_date: Utc::now(),
            digest: snapshot_digest(&data)?,
            data,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Replace every collection from a backup document
    ///
    /// Rejection order: unparseable JSON, missing backup markers,
    /// version mismatch, digest mismatch. All of them leave the current
    /// data in place.
    pub fn restore_from_backup(&self, text: &str) -> Result<(), RestoreError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|err| RestoreError::Malformed(err.to_string()))?;

        let object = value.as_object().ok_or(RestoreError::NotABackup)?;
        if !(object.contains_key("version")
            && object.contains_key("backup_id")
            && object.contains_key("backup_date"))
        {
            return Err(RestoreError::NotABackup);
        }

        let found = object
            .get("version")
            .and_then(|v| v.as_u64())
            .ok_or(RestoreError::NotABackup)? as u32;
        if found != BACKUP_VERSION {
            return Err(RestoreError::UnsupportedVersion {
                found,
                expected: BACKUP_VERSION,
            });
        }

        let envelope: BackupEnvelope =
            serde_json::from_value(value).map_err(|_| RestoreError::NotABackup)?;

        let expected = snapshot_digest(&envelope.data).map_err(crate::error::StoreError::from)?;
        if envelope.digest != expected {
            tracing::warn!(backup_id = %envelope.backup_id, "backup digest mismatch; refusing restore");
            return Err(RestoreError::DigestMismatch);
        }

        self.save(envelope.data)?;
        Ok(())
    }
}
