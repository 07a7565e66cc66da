//! Policy entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a policy document
///
/// `Approved` is the "good" terminal status counted by the compliance
/// rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyStatus {
    #[default]
    Draft,
    UnderReview,
    Approved,
    Retired,
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PolicyStatus::Draft => "draft",
            PolicyStatus::UnderReview => "under-review",
            PolicyStatus::Approved => "approved",
            PolicyStatus::Retired => "retired",
        };
        f.write_str(name)
    }
}

/// An organizational policy document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form category, e.g. "access-control", "incident-response"
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: PolicyStatus,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub effective_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_date: Option<DateTime<Utc>>,
    /// CMMC practices this policy satisfies, by practice id
    #[serde(default)]
    pub cmmc_practices: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Policy {
    /// Create a new draft policy with a fresh id and timestamps
    pub fn new(title: &str, category: &str) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            status: PolicyStatus::default(),
            version: "1.0".to_string(),
            owner: String::new(),
            effective_date: None,
            review_date: None,
            cmmc_practices: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the policy counts toward the compliance rate
    pub fn is_compliant(&self) -> bool {
        self.status == PolicyStatus::Approved
    }
}
