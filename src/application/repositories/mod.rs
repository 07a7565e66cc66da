//! Domain Repositories
//!
//! One repository per collection, all with the same contract: CRUD with
//! upsert-by-id, typed conjunctive search, and pure statistics. Read
//! paths are infallible - the store already degrades corrupted reads to
//! empty collections, so `all`/`get`/`search`/`statistics` cannot fail
//! and report generation never crashes on unreadable data. Mutations
//! return errors: `NotFound` for absent ids, store errors for failed
//! writes.

mod assessments;
mod assets;
mod calendar;
mod controls;
mod evidence;
mod policies;
mod reports;
mod team;

pub use assessments::{AssessmentFilter, AssessmentRepository, AssessmentStatistics};
pub use assets::{AssetFilter, AssetRepository, AssetStatistics};
pub use calendar::{CalendarFilter, CalendarPatch, CalendarRepository, CalendarStatistics};
pub use controls::{ControlFilter, ControlPatch, ControlRepository, ControlStatistics};
pub use evidence::{EvidenceFilter, EvidencePatch, EvidenceRepository, EvidenceStatistics};
pub use policies::{PolicyFilter, PolicyPatch, PolicyRepository, PolicyStatistics};
pub use reports::ReportRepository;
pub use team::{TaskFilter, TaskPatch, TeamRepository, TeamStatistics};

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Asset, Assessment, CalendarEvent, Control, EvidenceItem, Policy, ReportData, TeamMeeting,
    TeamMember, TeamTask,
};

/// Uniform identity and timestamp access for the shared upsert path
pub(crate) trait Record: Clone {
    fn record_id(&self) -> &str;
    fn set_record_id(&mut self, id: String);
    fn created_stamp(&self) -> DateTime<Utc>;
    fn set_created_stamp(&mut self, at: DateTime<Utc>);
    fn touch(&mut self, at: DateTime<Utc>);
}

macro_rules! impl_record {
    ($($entity:ty),+ $(,)?) => {
        $(impl Record for $entity {
            fn record_id(&self) -> &str {
                &self.id
            }
            fn set_record_id(&mut self, id: String) {
                self.id = id;
            }
            fn created_stamp(&self) -> DateTime<Utc> {
                self.created_at
            }
            fn set_created_stamp(&mut self, at: DateTime<Utc>) {
                self.created_at = at;
            }
            fn touch(&mut self, at: DateTime<Utc>) {
                self.updated_at = at;
            }
        })+
    };
}

impl_record!(
    Asset,
    Assessment,
    CalendarEvent,
    Control,
    EvidenceItem,
    Policy,
    ReportData,
    TeamMeeting,
    TeamMember,
    TeamTask,
);

/// Upsert by id: a blank id gets a fresh UUID, an existing id keeps its
/// original `created_at`, and `updated_at` refreshes either way.
pub(crate) fn upsert<T: Record>(items: &mut Vec<T>, mut entity: T) -> T {
    if entity.record_id().trim().is_empty() {
        entity.set_record_id(uuid::Uuid::new_v4().to_string());
    }
    let now = Utc::now();
    if let Some(existing) = items
        .iter_mut()
        .find(|item| item.record_id() == entity.record_id())
    {
        entity.set_created_stamp(existing.created_stamp());
        entity.touch(now);
        *existing = entity.clone();
    } else {
        entity.touch(now);
        items.push(entity.clone());
    }
    entity
}

/// Remove by id; false when the id was absent
pub(crate) fn remove_by_id<T: Record>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.record_id() != id);
    items.len() != before
}

/// `part / total * 100`, with an empty collection pinned to 0.0
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Case-insensitive containment used by every text filter
pub(crate) fn text_matches(needle: &str, fields: &[&str], tags: &[String]) -> bool {
    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
        || tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}
