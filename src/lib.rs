//! Custodian - compliance tracking core for CMMC 2.0 programs
//!
//! Custodian keeps a small organization's compliance posture - assets,
//! controls, policies, evidence, risks, team, and calendar - in a local
//! key-value store, scores risks and threats on a shared 5x5 model, and
//! aggregates every domain into reproducible compliance reports.

pub mod application;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod runtime;

// Re-exports for convenience
pub use application::export;
pub use application::reporting::{ReportEngine, ReportRequest};
pub use application::repositories::{
    AssessmentRepository, AssetRepository, CalendarRepository, ControlRepository,
    EvidenceRepository, PolicyRepository, ReportRepository, TeamRepository,
};
pub use config::Config;
pub use domain::entities::{
    Asset, Assessment, AssessmentKind, CalendarEvent, Control, DateRange, EvidenceItem, Policy,
    ReportData, Risk, Snapshot,
};
pub use domain::services::scoring;
pub use domain::value_objects::{Priority, RiskLevel};
pub use error::{ConfigError, RepoError, RestoreError, StoreError};
pub use infrastructure::backend::{FileBackend, MemoryBackend};
pub use infrastructure::store::{DataStore, ImportReport};
pub use runtime::ComplianceCore;
