//! Snapshot - the full in-memory mirror of every persisted collection
//!
//! One ordered `Vec` per collection, keyed in storage by the names in
//! [`Snapshot::COLLECTION_KEYS`]. Every field tolerates absence so a
//! partially-written medium deserializes to sensible defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    Asset, Assessment, CalendarEvent, Control, EvidenceItem, Policy, ReportData, TeamMeeting,
    TeamMember, TeamTask,
};

/// The operator profile kept inside settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Application settings; survives `reset(preserve_profile = true)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

/// Point-in-time mirror of all persisted collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    #[serde(default)]
    pub reports: Vec<ReportData>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub team_tasks: Vec<TeamTask>,
    #[serde(default)]
    pub team_meetings: Vec<TeamMeeting>,
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    /// Logical storage key suffix for every collection, in declaration
    /// order. The store prefixes these with its namespace.
    pub const COLLECTION_KEYS: [&'static str; 11] = [
        "assets",
        "assessments",
        "controls",
        "policies",
        "evidence",
        "calendar_events",
        "reports",
        "team_members",
        "team_tasks",
        "team_meetings",
        "settings",
    ];

    /// Total number of entities across the entity collections
    /// (settings is a singleton, not counted)
    pub fn entity_count(&self) -> usize {
        self.assets.len()
            + self.assessments.len()
            + self.controls.len()
            + self.policies.len()
            + self.evidence.len()
            + self.calendar_events.len()
            + self.reports.len()
            + self.team_members.len()
            + self.team_tasks.len()
            + self.team_meetings.len()
    }

    /// Clear every collection; the settings (and the profile inside
    /// them) survive when `preserve_profile` is set.
    pub fn clear(&mut self, preserve_profile: bool) {
        let settings = if preserve_profile {
            std::mem::take(&mut self.settings)
        } else {
            Settings::default()
        };
        *self = Snapshot {
            settings,
            ..Snapshot::default()
        };
    }
}
