//! ReportData entity - generated compliance reports
//!
//! A report's summary is derived from live domain statistics at
//! generation time; nothing here is hand-edited input. Sections are
//! display-agnostic data for whatever front end consumes the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::RiskLevel;

/// Kind of generated report
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    #[default]
    Compliance,
    RiskSummary,
    EvidenceInventory,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReportType::Compliance => "compliance",
            ReportType::RiskSummary => "risk-summary",
            ReportType::EvidenceInventory => "evidence-inventory",
        };
        f.write_str(name)
    }
}

/// Generation state machine: `draft -> generating -> completed | failed`.
/// Terminal states are not re-enterable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    #[default]
    Draft,
    Generating,
    Completed,
    Failed,
}

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Completed | ReportStatus::Failed)
    }

    fn allows(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (ReportStatus::Draft, ReportStatus::Generating)
                | (ReportStatus::Generating, ReportStatus::Completed)
                | (ReportStatus::Generating, ReportStatus::Failed)
        )
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Generating => "generating",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Rejected report state transition
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("report cannot move from '{from}' to '{to}'")]
pub struct InvalidTransition {
    pub from: ReportStatus,
    pub to: ReportStatus,
}

/// Overall risk band derived from the overall score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportRiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl ReportRiskLevel {
    /// Band thresholds over the overall score:
    /// `<50 critical, <70 high, <85 medium, else low`
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=49 => ReportRiskLevel::Critical,
            50..=69 => ReportRiskLevel::High,
            70..=84 => ReportRiskLevel::Medium,
            _ => ReportRiskLevel::Low,
        }
    }
}

impl std::fmt::Display for ReportRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReportRiskLevel::Low => "low",
            ReportRiskLevel::Medium => "medium",
            ReportRiskLevel::High => "high",
            ReportRiskLevel::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Inclusive period a report covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Per-domain compliance figures carried in the summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DomainScore {
    pub total: usize,
    pub compliant: usize,
    pub compliance_rate: f64,
}

/// Aggregated summary - always recomputed, never authoritative input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    /// round(mean of controls/policies/evidence compliance rates)
    pub overall_score: u8,
    pub risk_level: ReportRiskLevel,
    pub controls: DomainScore,
    pub policies: DomainScore,
    pub evidence: DomainScore,
    pub overdue_events: usize,
    pub open_tasks: usize,
    pub highest_risk_level: RiskLevel,
}

/// One slice of a distribution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: usize,
}

/// Chart rendering hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    #[default]
    Donut,
    Bar,
}

/// Display-agnostic chart description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub slices: Vec<ChartSlice>,
}

/// One row of the per-domain status table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRow {
    pub domain: String,
    pub total: usize,
    pub compliant: usize,
    pub compliance_rate: f64,
}

/// A labeled headline number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBlock {
    pub label: String,
    pub value: String,
}

/// An ordered, display-agnostic report section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "kebab-case")]
pub enum ReportSection {
    ExecutiveSummary { title: String, body: String },
    Distribution { title: String, chart: ChartSpec },
    StatusTable { title: String, rows: Vec<StatusRow> },
    Metrics { title: String, metrics: Vec<MetricBlock> },
}

/// A generated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub report_type: ReportType,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub sections: Vec<ReportSection>,
    #[serde(default)]
    pub summary: ReportSummary,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub date_range: DateRange,
    #[serde(default)]
    pub generated_by: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ReportData {
    /// Create a draft report shell awaiting generation
    pub fn draft(title: &str, description: &str, date_range: DateRange, generated_by: &str) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: description.to_string(),
            report_type: ReportType::Compliance,
            status: ReportStatus::Draft,
            sections: Vec::new(),
            summary: ReportSummary::default(),
            recommendations: Vec::new(),
            date_range,
            generated_by: generated_by.to_string(),
            generated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn transition(&mut self, next: ReportStatus) -> Result<(), InvalidTransition> {
        if !self.status.allows(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// `draft -> generating`
    pub fn begin_generation(&mut self) -> Result<(), InvalidTransition> {
        self.transition(ReportStatus::Generating)
    }

    /// `generating -> completed`, attaching the generated content
    pub fn complete(
        &mut self,
        summary: ReportSummary,
        sections: Vec<ReportSection>,
        recommendations: Vec<String>,
    ) -> Result<(), InvalidTransition> {
        self.transition(ReportStatus::Completed)?;
        self.summary = summary;
        self.sections = sections;
        self.recommendations = recommendations;
        self.generated_at = Some(Utc::now());
        Ok(())
    }

    /// `generating -> failed`
    pub fn fail(&mut self) -> Result<(), InvalidTransition> {
        self.transition(ReportStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        let now = Utc::now();
        DateRange {
            start: now - chrono::Duration::days(90),
            end: now,
        }
    }

    #[test]
    fn risk_band_thresholds() {
        assert_eq!(ReportRiskLevel::from_score(0), ReportRiskLevel::Critical);
        assert_eq!(ReportRiskLevel::from_score(49), ReportRiskLevel::Critical);
        assert_eq!(ReportRiskLevel::from_score(50), ReportRiskLevel::High);
        assert_eq!(ReportRiskLevel::from_score(69), ReportRiskLevel::High);
        assert_eq!(ReportRiskLevel::from_score(70), ReportRiskLevel::Medium);
        assert_eq!(ReportRiskLevel::from_score(84), ReportRiskLevel::Medium);
        assert_eq!(ReportRiskLevel::from_score(85), ReportRiskLevel::Low);
        assert_eq!(ReportRiskLevel::from_score(100), ReportRiskLevel::Low);
    }

    #[test]
    fn happy_path_walks_draft_generating_completed() {
        let mut report = ReportData::draft("Q3", "", range(), "dana");
        assert_eq!(report.status, ReportStatus::Draft);

        report.begin_generation().unwrap();
        assert_eq!(report.status, ReportStatus::Generating);

        report
            .complete(ReportSummary::default(), Vec::new(), Vec::new())
            .unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
        assert!(report.generated_at.is_some());
    }

    #[test]
    fn terminal_states_are_not_reenterable() {
        let mut report = ReportData::draft("Q3", "", range(), "dana");
        report.begin_generation().unwrap();
        report
            .complete(ReportSummary::default(), Vec::new(), Vec::new())
            .unwrap();

        let err = report.begin_generation().unwrap_err();
        assert_eq!(err.from, ReportStatus::Completed);
        assert!(report.fail().is_err());
    }

    #[test]
    fn draft_cannot_jump_straight_to_completed() {
        let mut report = ReportData::draft("Q3", "", range(), "dana");
        assert!(report
            .complete(ReportSummary::default(), Vec::new(), Vec::new())
            .is_err());
        assert_eq!(report.status, ReportStatus::Draft);
    }

    #[test]
    fn generating_can_fail_once() {
        let mut report = ReportData::draft("Q3", "", range(), "dana");
        report.begin_generation().unwrap();
        report.fail().unwrap();
        assert_eq!(report.status, ReportStatus::Failed);
        assert!(report.begin_generation().is_err());
    }
}
