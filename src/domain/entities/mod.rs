//! Domain Entities
//!
//! Persisted records with identity and lifecycle. Every entity carries
//! a UUID string id unique within its collection, an immutable
//! `created_at`, and an `updated_at` refreshed on every mutation.
//! Cross-collection references are by string id only.

mod asset;
mod assessment;
mod calendar;
mod control;
mod evidence;
mod policy;
mod report;
mod snapshot;
mod team;

pub use asset::{Asset, AssetType, CmmcScope};
pub use assessment::{Assessment, AssessmentKind, AssessmentStatus, Risk, RiskStatus};
pub use calendar::{CalendarEvent, EventStatus, EventType};
pub use control::{Control, ControlStatus, Effectiveness};
pub use evidence::{EvidenceItem, EvidenceStatus, EvidenceType};
pub use policy::{Policy, PolicyStatus};
pub use report::{
    ChartKind, ChartSlice, ChartSpec, DateRange, DomainScore, InvalidTransition, MetricBlock,
    ReportData, ReportRiskLevel, ReportSection, ReportStatus, ReportSummary, ReportType, StatusRow,
};
pub use snapshot::{Settings, Snapshot, UserProfile};
pub use team::{TaskStatus, TeamMeeting, TeamMember, TeamTask};

/// Fresh entity id
pub(crate) fn new_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
