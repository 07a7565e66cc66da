//! Composition root
//!
//! The source system reached its services through hidden singletons;
//! here everything is dependency-injected: one `ComplianceCore` is
//! constructed at process start and handed to consumers by reference.
//! `open_default` is the only place that resolves ambient state (the
//! platform data directory).

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::reporting::ReportEngine;
use crate::application::repositories::{
    AssessmentRepository, AssetRepository, CalendarRepository, ControlRepository,
    EvidenceRepository, PolicyRepository, TeamRepository,
};
use crate::domain::ports::StorageBackend;
use crate::error::ConfigError;
use crate::infrastructure::backend::FileBackend;
use crate::infrastructure::store::DataStore;

/// Every repository plus the reporting engine over one shared store
pub struct ComplianceCore {
    store: Arc<DataStore>,
    pub assets: AssetRepository,
    pub assessments: AssessmentRepository,
    pub controls: ControlRepository,
    pub policies: PolicyRepository,
    pub evidence: EvidenceRepository,
    pub team: TeamRepository,
    pub calendar: CalendarRepository,
    pub reporting: ReportEngine,
}

impl ComplianceCore {
    /// Build the core over any backend
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self::with_store(Arc::new(DataStore::new(backend)))
    }

    /// Build the core over an existing store handle
    pub fn with_store(store: Arc<DataStore>) -> Self {
        Self {
            assets: AssetRepository::new(Arc::clone(&store)),
            assessments: AssessmentRepository::new(Arc::clone(&store)),
            controls: ControlRepository::new(Arc::clone(&store)),
            policies: PolicyRepository::new(Arc::clone(&store)),
            evidence: EvidenceRepository::new(Arc::clone(&store)),
            team: TeamRepository::new(Arc::clone(&store)),
            calendar: CalendarRepository::new(Arc::clone(&store)),
            reporting: ReportEngine::new(Arc::clone(&store)),
            store,
        }
    }

    /// File-backed core rooted at `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(data_dir))
    }

    /// File-backed core in the platform data directory
    pub fn open_default() -> Result<Self, ConfigError> {
        let dir = dirs::data_dir()
            .ok_or(ConfigError::NoDataDir)?
            .join("custodian");
        Ok(Self::open(dir))
    }

    /// Direct store access for backup/restore/import/reset flows
    pub fn store(&self) -> &DataStore {
        &self.store
    }
}
