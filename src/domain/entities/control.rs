//! Control entity - a CMMC practice tracked to implementation
//!
//! Controls reference policies and CMMC practices by string id only;
//! nothing resolves those references structurally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Priority;

/// Implementation status of a control
///
/// `Implemented` is the "good" terminal status counted by the
/// compliance rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum ControlStatus {
    #[default]
    NotImplemented,
    Planned,
    InProgress,
    Implemented,
    NotApplicable,
}

impl std::fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ControlStatus::NotImplemented => "not-implemented",
            ControlStatus::Planned => "planned",
            ControlStatus::InProgress => "in-progress",
            ControlStatus::Implemented => "implemented",
            ControlStatus::NotApplicable => "not-applicable",
        };
        f.write_str(name)
    }
}

/// Assessed effectiveness of an implemented control, ordered 0..=4
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Effectiveness {
    #[default]
    NotAssessed,
    Ineffective,
    PartiallyEffective,
    LargelyEffective,
    FullyEffective,
}

impl Effectiveness {
    /// Integer rank used when averaging effectiveness across controls
    pub fn rank(&self) -> u8 {
        match self {
            Effectiveness::NotAssessed => 0,
            Effectiveness::Ineffective => 1,
            Effectiveness::PartiallyEffective => 2,
            Effectiveness::LargelyEffective => 3,
            Effectiveness::FullyEffective => 4,
        }
    }
}

/// A CMMC practice record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    #[serde(default)]
    pub id: String,
    /// CMMC practice identifier, e.g. "AC.L1-3.1.1"
    #[serde(default)]
    pub practice_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// CMMC domain family, e.g. "AC", "IR"
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub status: ControlStatus,
    #[serde(default)]
    pub effectiveness: Effectiveness,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub related_policies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Control {
    /// Create a new control with a fresh id and timestamps
    pub fn new(practice_id: &str, title: &str, family: &str) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            practice_id: practice_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            family: family.to_string(),
            status: ControlStatus::default(),
            effectiveness: Effectiveness::default(),
            priority: Priority::default(),
            owner: String::new(),
            related_policies: Vec::new(),
            tags: Vec::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the control counts toward the compliance rate
    pub fn is_compliant(&self) -> bool {
        self.status == ControlStatus::Implemented
    }
}
