//! Report generation over seeded repositories.

use custodian::application::reporting::{
    REC_CONTROLS, REC_EVIDENCE, REC_MAINTAIN, REC_OVERDUE, REC_RISK, REC_TEAM,
};
use custodian::domain::entities::{
    DateRange, ReportRiskLevel, ReportSection, ReportStatus, TaskStatus, TeamTask,
};
use custodian::{ReportRequest, RiskLevel};

use crate::common;

fn request() -> ReportRequest {
    let end = chrono::Utc::now();
    ReportRequest {
        title: "Quarterly compliance".to_string(),
        description: "Automated".to_string(),
        date_range: DateRange {
            start: end - chrono::Duration::days(90),
            end,
        },
        generated_by: "tests".to_string(),
    }
}

#[test]
fn overall_score_is_the_rounded_mean_of_domain_rates() {
    // controls 40%, policies 90%, evidence 95% -> 75 -> medium
    let core = common::rated_core();
    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();

    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(report.summary.overall_score, 75);
    assert_eq!(report.summary.risk_level, ReportRiskLevel::Medium);
    assert_eq!(report.summary.controls.compliant, 2);
    assert_eq!(report.summary.controls.total, 5);
}

#[test]
fn worst_single_risk_drives_the_assessment_level() {
    let core = common::memory_core();
    let saved = core
        .assessments
        .save(common::worst_case_assessment())
        .unwrap();

    // 16 -> high, 25 -> very-high; the max wins, never the average.
    assert_eq!(saved.risks[0].risk_score, 16);
    assert_eq!(saved.risks[0].residual_risk, RiskLevel::High);
    assert_eq!(saved.risks[1].risk_score, 25);
    assert_eq!(saved.overall_risk_level, RiskLevel::VeryHigh);

    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();
    assert_eq!(report.summary.highest_risk_level, RiskLevel::VeryHigh);
}

#[test]
fn generated_reports_are_persisted_through_the_store() {
    let core = common::rated_core();
    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();

    let stored = core.reporting.reports().get(&report.id).unwrap();
    assert_eq!(stored.summary.overall_score, 75);
    assert_eq!(stored.status, ReportStatus::Completed);
    assert!(stored.generated_at.is_some());
}

#[test]
fn sections_are_ordered_and_display_agnostic() {
    let core = common::rated_core();
    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();

    assert_eq!(report.sections.len(), 4);
    assert!(matches!(
        report.sections[0],
        ReportSection::ExecutiveSummary { .. }
    ));
    match &report.sections[2] {
        ReportSection::StatusTable { rows, .. } => {
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].domain, "Controls");
            assert_eq!(rows[0].compliance_rate, 40.0);
        }
        other => panic!("expected status table, got {:?}", other),
    }
}

#[test]
fn recommendations_follow_the_fixed_rule_order() {
    let core = common::rated_core();
    common::add_overdue_event(&core);
    common::add_disengaged_team(&core);
    // Push evidence compliance below 60% as well.
    for item in core.evidence.all() {
        core.evidence
            .update(
                &item.id,
                custodian::application::repositories::EvidencePatch {
                    status: Some(custodian::domain::entities::EvidenceStatus::Pending),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();

    // Evidence at 0% drags the overall score into the critical band,
    // so the risk rule fires between the evidence and team rules.
    assert_eq!(
        report.recommendations,
        vec![
            REC_CONTROLS.to_string(),
            REC_OVERDUE.to_string(),
            REC_EVIDENCE.to_string(),
            REC_RISK.to_string(),
            REC_TEAM.to_string(),
        ]
    );
}

#[test]
fn healthy_posture_yields_only_the_maintain_fallback() {
    let core = common::rated_core();
    // Implement the remaining controls to lift every rate over the bars.
    for control in core.controls.all() {
        core.controls
            .update(
                &control.id,
                custodian::application::repositories::ControlPatch {
                    status: Some(custodian::domain::entities::ControlStatus::Implemented),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    // One finished task keeps the team rule quiet.
    let mut task = TeamTask::new("Done task");
    task.status = TaskStatus::Done;
    core.team.save_task(task).unwrap();

    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();
    assert_eq!(report.recommendations, vec![REC_MAINTAIN.to_string()]);
}

#[test]
fn empty_store_reports_zero_score_and_critical_band() {
    let core = common::memory_core();
    let report = core
        .reporting
        .generate_compliance_report(request())
        .unwrap();

    assert_eq!(report.summary.overall_score, 0);
    assert_eq!(report.summary.risk_level, ReportRiskLevel::Critical);
    // The controls rule fires on an empty store.
    assert_eq!(report.recommendations[0], REC_CONTROLS.to_string());
}
