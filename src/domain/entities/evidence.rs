//! EvidenceItem entity - artifacts backing control implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of evidence artifact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceType {
    #[default]
    Document,
    Screenshot,
    LogExtract,
    Configuration,
    Attestation,
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EvidenceType::Document => "document",
            EvidenceType::Screenshot => "screenshot",
            EvidenceType::LogExtract => "log-extract",
            EvidenceType::Configuration => "configuration",
            EvidenceType::Attestation => "attestation",
        };
        f.write_str(name)
    }
}

/// Review status of an evidence item
///
/// `Approved` is the "good" terminal status counted by the compliance
/// rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceStatus {
    #[default]
    Pending,
    Submitted,
    Approved,
    Rejected,
    Expired,
}

impl std::fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EvidenceStatus::Pending => "pending",
            EvidenceStatus::Submitted => "submitted",
            EvidenceStatus::Approved => "approved",
            EvidenceStatus::Rejected => "rejected",
            EvidenceStatus::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// An evidence artifact attached to one or more controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence_type: EvidenceType,
    #[serde(default)]
    pub status: EvidenceStatus,
    /// Controls this artifact supports, by control id
    #[serde(default)]
    pub control_ids: Vec<String>,
    #[serde(default)]
    pub collected_by: String,
    #[serde(default = "Utc::now")]
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl EvidenceItem {
    /// Create a new pending evidence item
    pub fn new(title: &str, evidence_type: EvidenceType) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: String::new(),
            evidence_type,
            status: EvidenceStatus::default(),
            control_ids: Vec::new(),
            collected_by: String::new(),
            collected_at: now,
            expires_at: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the item counts toward the compliance rate
    pub fn is_compliant(&self) -> bool {
        self.status == EvidenceStatus::Approved
    }

    /// True when an expiry is set and has passed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry < now)
    }
}
