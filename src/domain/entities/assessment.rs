//! Assessment entity - risk assessments and threat models
//!
//! Both kinds share one collection, one record shape, and one scoring
//! path; `kind` is the only distinction. A risk's `risk_score` and
//! `residual_risk` are always derived together from likelihood x impact
//! (see `rescore`), and an assessment's `overall_risk_level` is derived
//! from the maximum constituent score. Repositories call `rescore`
//! before every persist, so there is no code path that writes one of
//! the derived fields without the others.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::scoring;
use crate::domain::value_objects::RiskLevel;

/// What the assessment models
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentKind {
    #[default]
    RiskAssessment,
    ThreatModel,
}

impl std::fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssessmentKind::RiskAssessment => "risk-assessment",
            AssessmentKind::ThreatModel => "threat-model",
        };
        f.write_str(name)
    }
}

/// Lifecycle status of an assessment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssessmentStatus::Draft => "draft",
            AssessmentStatus::InProgress => "in-progress",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Archived => "archived",
        };
        f.write_str(name)
    }
}

/// Treatment status of a single risk or threat
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum RiskStatus {
    #[default]
    Open,
    Mitigating,
    Accepted,
    Transferred,
    Closed,
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskStatus::Open => "open",
            RiskStatus::Mitigating => "mitigating",
            RiskStatus::Accepted => "accepted",
            RiskStatus::Transferred => "transferred",
            RiskStatus::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// A single risk (or threat) inside an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form category, e.g. "insider", "supply-chain"
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub likelihood: RiskLevel,
    #[serde(default)]
    pub impact: RiskLevel,
    /// Derived: likelihood weight x impact weight. Never set directly.
    #[serde(default)]
    pub risk_score: u8,
    /// Derived: the level bucket of `risk_score`. Never set directly.
    #[serde(default)]
    pub residual_risk: RiskLevel,
    #[serde(default)]
    pub status: RiskStatus,
    #[serde(default)]
    pub owner: String,
    /// Mitigating controls, by control id
    #[serde(default)]
    pub controls: Vec<String>,
    #[serde(default)]
    pub cmmc_practices: Vec<String>,
}

impl Risk {
    /// Create a risk with its derived fields computed
    pub fn new(title: &str, category: &str, likelihood: RiskLevel, impact: RiskLevel) -> Self {
        let mut risk = Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            likelihood,
            impact,
            risk_score: 0,
            residual_risk: RiskLevel::VeryLow,
            status: RiskStatus::default(),
            owner: String::new(),
            controls: Vec::new(),
            cmmc_practices: Vec::new(),
        };
        risk.rescore();
        risk
    }

    /// Recompute `risk_score` and `residual_risk` from likelihood x
    /// impact. The two fields only ever change here, together.
    pub fn rescore(&mut self) {
        self.risk_score = scoring::risk_score(self.likelihood, self.impact);
        self.residual_risk = scoring::level_from_score(self.risk_score);
    }

    /// Change the ratings; derived fields update in the same operation
    pub fn set_ratings(&mut self, likelihood: RiskLevel, impact: RiskLevel) {
        self.likelihood = likelihood;
        self.impact = impact;
        self.rescore();
    }
}

/// A risk assessment or threat model over a set of risks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: AssessmentKind,
    #[serde(default)]
    pub status: AssessmentStatus,
    /// What the assessment covers, e.g. "CUI enclave"
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub risks: Vec<Risk>,
    /// Derived: level of the maximum risk score; `low` when empty
    #[serde(default)]
    pub overall_risk_level: RiskLevel,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    /// Create an empty assessment of the given kind
    pub fn new(title: &str, kind: AssessmentKind) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: String::new(),
            kind,
            status: AssessmentStatus::default(),
            scope: String::new(),
            risks: Vec::new(),
            overall_risk_level: scoring::EMPTY_OVERALL_LEVEL,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute every risk's derived fields and the overall level
    pub fn rescore(&mut self) {
        for risk in &mut self.risks {
            risk.rescore();
        }
        self.overall_risk_level = scoring::overall_level(self.risks.iter().map(|r| r.risk_score));
    }

    /// Append a risk and refresh the overall level
    pub fn add_risk(&mut self, risk: Risk) {
        self.risks.push(risk);
        self.rescore();
    }
}
