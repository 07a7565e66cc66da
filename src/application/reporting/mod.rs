//! Reporting/Aggregation Engine
//!
//! Fans out to every domain repository's statistics, merges them into a
//! summary that is internally consistent with the live store at
//! generation time, and derives display-agnostic sections plus a
//! deterministic recommendation list. Each statistics read is
//! independent and infallible, so one unreadable domain can never sink
//! a report - it simply contributes zeroed figures.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::entities::{
    ChartKind, ChartSlice, ChartSpec, ControlStatus, DateRange, DomainScore, MetricBlock,
    ReportData, ReportRiskLevel, ReportSection, ReportSummary, StatusRow,
};
use crate::error::StoreResult;
use crate::infrastructure::store::DataStore;

use super::repositories::{
    AssessmentRepository, AssessmentStatistics, CalendarRepository, CalendarStatistics,
    ControlRepository, ControlStatistics, EvidenceRepository, EvidenceStatistics, PolicyRepository,
    PolicyStatistics, ReportRepository, TeamRepository, TeamStatistics,
};

/// Fixed recommendation strings, appended in rule order
pub const REC_CONTROLS: &str =
    "Prioritize remediation of unimplemented controls; the control compliance rate is below 70%.";
pub const REC_OVERDUE: &str =
    "Address overdue calendar events; reschedule or complete the outstanding assessments and reviews.";
pub const REC_EVIDENCE: &str =
    "Collect and approve additional evidence; less than 60% of evidence items are approved.";
pub const REC_RISK: &str =
    "Develop a remediation plan for the highest-risk findings; the overall compliance risk is elevated.";
pub const REC_TEAM: &str =
    "Re-engage the compliance team; fewer than half of the assigned tasks are completed.";
pub const REC_MAINTAIN: &str =
    "Maintain current compliance levels and continue periodic reviews.";

/// Inputs for one report generation
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub title: String,
    pub description: String,
    pub date_range: DateRange,
    pub generated_by: String,
}

/// Statistics gathered from every domain for one generation
#[derive(Debug, Clone, Default, Serialize)]
pub struct DomainStatistics {
    pub controls: ControlStatistics,
    pub policies: PolicyStatistics,
    pub evidence: EvidenceStatistics,
    pub team: TeamStatistics,
    pub calendar: CalendarStatistics,
    pub assessments: AssessmentStatistics,
}

/// Merges domain statistics into persisted compliance reports
#[derive(Clone)]
pub struct ReportEngine {
    reports: ReportRepository,
    controls: ControlRepository,
    policies: PolicyRepository,
    evidence: EvidenceRepository,
    team: TeamRepository,
    calendar: CalendarRepository,
    assessments: AssessmentRepository,
}

impl ReportEngine {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self {
            reports: ReportRepository::new(Arc::clone(&store)),
            controls: ControlRepository::new(Arc::clone(&store)),
            policies: PolicyRepository::new(Arc::clone(&store)),
            evidence: EvidenceRepository::new(Arc::clone(&store)),
            team: TeamRepository::new(Arc::clone(&store)),
            calendar: CalendarRepository::new(Arc::clone(&store)),
            assessments: AssessmentRepository::new(store),
        }
    }

    /// Gather every domain's statistics. The reads are independent;
    /// order carries no meaning.
    pub fn collect_statistics(&self) -> DomainStatistics {
        DomainStatistics {
            controls: self.controls.statistics(),
            policies: self.policies.statistics(),
            evidence: self.evidence.statistics(),
            team: self.team.statistics(),
            calendar: self.calendar.statistics(),
            assessments: self.assessments.statistics(),
        }
    }

    /// Generate and persist a compliance report
    ///
    /// The report walks `draft -> generating -> completed`; a failed
    /// persist surfaces the store error to the caller (there is no
    /// medium left to park a `failed` report on).
    pub fn generate_compliance_report(&self, request: ReportRequest) -> StoreResult<ReportData> {
        let mut report = ReportData::draft(
            &request.title,
            &request.description,
            request.date_range,
            &request.generated_by,
        );
        report
            .begin_generation()
            .expect("a fresh draft accepts generation");

        let stats = self.collect_statistics();
        let summary = build_summary(&stats);
        let sections = build_sections(&summary, &stats);
        let recommendations = recommendations(&summary, &stats);

        report
            .complete(summary, sections, recommendations)
            .expect("a generating report accepts completion");

        info!(
            report_id = %report.id,
            overall_score = report.summary.overall_score,
            risk_level = %report.summary.risk_level,
            "compliance report generated"
        );
        self.reports.save(report)
    }

    /// Repository handle for stored-report maintenance
    pub fn reports(&self) -> &ReportRepository {
        &self.reports
    }
}

/// `round(mean(controls, policies, evidence))` plus the derived band
pub fn build_summary(stats: &DomainStatistics) -> ReportSummary {
    let overall = (stats.controls.compliance_rate
        + stats.policies.compliance_rate
        + stats.evidence.compliance_rate)
        / 3.0;
    let overall_score = overall.round() as u8;

    ReportSummary {
        overall_score,
        risk_level: ReportRiskLevel::from_score(overall_score),
        controls: DomainScore {
            total: stats.controls.total,
            compliant: implemented_count(&stats.controls),
            compliance_rate: stats.controls.compliance_rate,
        },
        policies: DomainScore {
            total: stats.policies.total,
            compliant: approved_policy_count(&stats.policies),
            compliance_rate: stats.policies.compliance_rate,
        },
        evidence: DomainScore {
            total: stats.evidence.total,
            compliant: approved_evidence_count(&stats.evidence),
            compliance_rate: stats.evidence.compliance_rate,
        },
        overdue_events: stats.calendar.overdue,
        open_tasks: stats.team.total_tasks
            - stats
                .team
                .by_task_status
                .get(&crate::domain::entities::TaskStatus::Done)
                .copied()
                .unwrap_or(0),
        highest_risk_level: stats.assessments.highest_overall_level,
    }
}

fn implemented_count(stats: &ControlStatistics) -> usize {
    stats
        .by_status
        .get(&ControlStatus::Implemented)
        .copied()
        .unwrap_or(0)
}

fn approved_policy_count(stats: &PolicyStatistics) -> usize {
    stats
        .by_status
        .get(&crate::domain::entities::PolicyStatus::Approved)
        .copied()
        .unwrap_or(0)
}

fn approved_evidence_count(stats: &EvidenceStatistics) -> usize {
    stats
        .by_status
        .get(&crate::domain::entities::EvidenceStatus::Approved)
        .copied()
        .unwrap_or(0)
}

/// Ordered, display-agnostic sections built purely from the aggregates
pub fn build_sections(summary: &ReportSummary, stats: &DomainStatistics) -> Vec<ReportSection> {
    let mut sections = Vec::with_capacity(4);

    sections.push(ReportSection::ExecutiveSummary {
        title: "Executive Summary".to_string(),
        body: executive_summary_text(summary),
    });

    sections.push(ReportSection::Distribution {
        title: "Control Status Distribution".to_string(),
        chart: ChartSpec {
            kind: ChartKind::Donut,
            slices: stats
                .controls
                .by_status
                .iter()
                .map(|(status, count)| ChartSlice {
                    label: status.to_string(),
                    value: *count,
                })
                .collect(),
        },
    });

    sections.push(ReportSection::StatusTable {
        title: "Compliance by Domain".to_string(),
        rows: vec![
            status_row("Controls", summary.controls),
            status_row("Policies", summary.policies),
            status_row("Evidence", summary.evidence),
        ],
    });

    sections.push(ReportSection::Metrics {
        title: "Key Metrics".to_string(),
        metrics: vec![
            MetricBlock {
                label: "Overall score".to_string(),
                value: summary.overall_score.to_string(),
            },
            MetricBlock {
                label: "Overdue events".to_string(),
                value: summary.overdue_events.to_string(),
            },
            MetricBlock {
                label: "Open risks".to_string(),
                value: stats.assessments.open_risks.to_string(),
            },
            MetricBlock {
                label: "Evidence expiring within 30 days".to_string(),
                value: stats.evidence.expiring_soon.to_string(),
            },
            MetricBlock {
                label: "Task completion".to_string(),
                value: format!("{:.0}%", stats.team.task_completion_rate),
            },
        ],
    });

    sections
}

fn status_row(domain: &str, score: DomainScore) -> StatusRow {
    StatusRow {
        domain: domain.to_string(),
        total: score.total,
        compliant: score.compliant,
        compliance_rate: score.compliance_rate,
    }
}

fn executive_summary_text(summary: &ReportSummary) -> String {
    format!(
        "Overall compliance score is {} of 100 ({} risk). Controls: {} of {} implemented ({:.1}%). \
         Policies: {} of {} approved ({:.1}%). Evidence: {} of {} approved ({:.1}%). \
         {} overdue calendar event(s); highest assessed risk level is {}.",
        summary.overall_score,
        summary.risk_level,
        summary.controls.compliant,
        summary.controls.total,
        summary.controls.compliance_rate,
        summary.policies.compliant,
        summary.policies.total,
        summary.policies.compliance_rate,
        summary.evidence.compliant,
        summary.evidence.total,
        summary.evidence.compliance_rate,
        summary.overdue_events,
        summary.highest_risk_level,
    )
}

/// Deterministic rule list, evaluated in fixed order. Each rule appends
/// one fixed string when its threshold is crossed; if none fire, the
/// single maintain fallback is appended.
pub fn recommendations(summary: &ReportSummary, stats: &DomainStatistics) -> Vec<String> {
    let mut out = Vec::new();

    if stats.controls.compliance_rate < 70.0 {
        out.push(REC_CONTROLS.to_string());
    }
    if stats.calendar.overdue > 0 {
        out.push(REC_OVERDUE.to_string());
    }
    if stats.evidence.compliance_rate < 60.0 {
        out.push(REC_EVIDENCE.to_string());
    }
    if matches!(
        summary.risk_level,
        ReportRiskLevel::High | ReportRiskLevel::Critical
    ) {
        out.push(REC_RISK.to_string());
    }
    if stats.team.total_tasks > 0 && stats.team.task_completion_rate < 50.0 {
        out.push(REC_TEAM.to_string());
    }

    if out.is_empty() {
        out.push(REC_MAINTAIN.to_string());
    }
    out
}
