//! Asset entity - inventory items in or out of CMMC scope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RiskLevel;

/// Category of an inventoried asset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    #[default]
    Hardware,
    Software,
    Data,
    Facility,
    Personnel,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetType::Hardware => "hardware",
            AssetType::Software => "software",
            AssetType::Data => "data",
            AssetType::Facility => "facility",
            AssetType::Personnel => "personnel",
        };
        f.write_str(name)
    }
}

/// Whether the asset falls inside the CMMC assessment boundary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum CmmcScope {
    InScope,
    OutOfScope,
    #[default]
    PendingReview,
}

impl std::fmt::Display for CmmcScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CmmcScope::InScope => "in-scope",
            CmmcScope::OutOfScope => "out-of-scope",
            CmmcScope::PendingReview => "pending-review",
        };
        f.write_str(name)
    }
}

/// An inventoried asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(default)]
    pub criticality: RiskLevel,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cmmc_scope: CmmcScope,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Create a new asset with a fresh id and timestamps
    pub fn new(name: &str, asset_type: AssetType) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            name: name.to_string(),
            description: String::new(),
            asset_type,
            criticality: RiskLevel::default(),
            owner: String::new(),
            location: String::new(),
            cmmc_scope: CmmcScope::default(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
