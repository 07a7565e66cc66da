//! DataStore - single source of truth for all collections
//!
//! Owns serialization to the StorageBackend and the in-memory mirror.
//! The failure contract is asymmetric and firm:
//!
//! - **reads degrade gracefully**: a missing or corrupted document is
//!   logged and replaced by that collection's empty default; `snapshot`
//!   can never fail;
//! - **writes fail loudly**: quota and I/O failures on `save` propagate
//!   so callers can react to storage exhaustion.
//!
//! Every mutation is read-snapshot -> modify -> write-snapshot,
//! optimistic last-writer-wins with no versioning. That is acceptable
//! only because the system is single-user by design; a multi-writer
//! port needs compare-and-swap on a revision counter.

mod backup;
mod exchange;

pub use backup::BACKUP_VERSION;
pub use exchange::{ImportReport, EXCHANGE_FORMAT};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::domain::entities::Snapshot;
use crate::domain::ports::{BackendError, StorageBackend};
use crate::error::{StoreError, StoreResult};

/// Namespace prefix for every storage key
const KEY_PREFIX: &str = "custodian";

fn collection_key(name: &str) -> String {
    format!("{}.{}", KEY_PREFIX, name)
}

/// Key-value-backed store with an in-memory snapshot mirror
pub struct DataStore {
    backend: Box<dyn StorageBackend>,
    cache: RwLock<Option<Snapshot>>,
}

impl DataStore {
    /// Wrap a backend. Nothing is read until the first `snapshot` call.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            cache: RwLock::new(None),
        }
    }

    /// Current snapshot, loading from the backend on first access.
    /// Infallible: corrupted or unreadable documents come back as that
    /// collection's empty default.
    pub fn snapshot(&self) -> Snapshot {
        if let Some(snapshot) = self.cache.read().as_ref() {
            return snapshot.clone();
        }

        let mut guard = self.cache.write();
        if let Some(snapshot) = guard.as_ref() {
            return snapshot.clone();
        }
        let snapshot = self.load_from_backend();
        *guard = Some(snapshot.clone());
        snapshot
    }

    fn load_from_backend(&self) -> Snapshot {
        Snapshot {
            assets: self.load_document("assets"),
            assessments: self.load_document("assessments"),
            controls: self.load_document("controls"),
            policies: self.load_document("policies"),
            evidence: self.load_document("evidence"),
            calendar_events: self.load_document("calendar_events"),
            reports: self.load_document("reports"),
            team_members: self.load_document("team_members"),
            team_tasks: self.load_document("team_tasks"),
            team_meetings: self.load_document("team_meetings"),
            settings: self.load_document("settings"),
        }
    }

    /// Read one collection document, degrading to `T::default()` on a
    /// missing key, a backend failure, or unparseable content.
    fn load_document<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let key = collection_key(name);
        let raw = match self.backend.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(key = %key, error = %err, "storage read failed; using empty collection");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "stored document is corrupted; using empty collection");
                T::default()
            }
        }
    }

    /// Serialize and write every collection, then commit the mirror.
    /// The mirror only advances after the backend accepts the write, so
    /// a failed save leaves `snapshot()` at the pre-write state.
    pub fn save(&self, snapshot: Snapshot) -> StoreResult<()> {
        self.write_document("assets", &snapshot.assets)?;
        self.write_document("assessments", &snapshot.assessments)?;
        self.write_document("controls", &snapshot.controls)?;
        self.write_document("policies", &snapshot.policies)?;
        self.write_document("evidence", &snapshot.evidence)?;
        self.write_document("calendar_events", &snapshot.calendar_events)?;
        self.write_document("reports", &snapshot.reports)?;
        self.write_document("team_members", &snapshot.team_members)?;
        self.write_document("team_tasks", &snapshot.team_tasks)?;
        self.write_document("team_meetings", &snapshot.team_meetings)?;
        self.write_document("settings", &snapshot.settings)?;

        *self.cache.write() = Some(snapshot);
        Ok(())
    }

    fn write_document<T: Serialize>(&self, name: &str, value: &T) -> StoreResult<()> {
        let key = collection_key(name);
        let raw = serde_json::to_string(value)?;
        self.backend.write(&key, &raw).map_err(|err| match err {
            BackendError::QuotaExceeded => StoreError::QuotaExceeded { key: key.clone() },
            BackendError::Io(message) => StoreError::Backend {
                key: key.clone(),
                message,
            },
        })
    }

    /// Read-modify-write helper used by repositories
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Snapshot) -> R) -> StoreResult<R> {
        let mut working = self.snapshot();
        let result = f(&mut working);
        self.save(working)?;
        Ok(result)
    }

    /// Clear every collection. Settings (including the operator
    /// profile) survive when `preserve_profile` is set.
    pub fn reset(&self, preserve_profile: bool) -> StoreResult<()> {
        self.mutate(|snapshot| snapshot.clear(preserve_profile))
    }
}
