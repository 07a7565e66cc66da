//! Shared fixtures for integration tests

use custodian::domain::entities::{
    Assessment, AssessmentKind, CalendarEvent, Control, ControlStatus, EventType, EvidenceItem,
    EvidenceStatus, EvidenceType, Policy, PolicyStatus, Risk, TaskStatus, TeamMember, TeamTask,
};
use custodian::{ComplianceCore, MemoryBackend, RiskLevel};

/// Core over a fresh in-memory backend
pub fn memory_core() -> ComplianceCore {
    ComplianceCore::new(MemoryBackend::new())
}

/// Core seeded to known compliance rates: controls 2/5 implemented
/// (40%), policies 9/10 approved (90%), evidence 19/20 approved (95%).
pub fn rated_core() -> ComplianceCore {
    let core = memory_core();

    for n in 0..5 {
        let mut control = Control::new(
            &format!("AC.L1-3.1.{}", n + 1),
            &format!("Control {}", n + 1),
            "AC",
        );
        if n < 2 {
            control.status = ControlStatus::Implemented;
        }
        core.controls.save(control).unwrap();
    }

    for n in 0..10 {
        let mut policy = Policy::new(&format!("Policy {}", n + 1), "governance");
        if n < 9 {
            policy.status = PolicyStatus::Approved;
        }
        core.policies.save(policy).unwrap();
    }

    for n in 0..20 {
        let mut item = EvidenceItem::new(&format!("Evidence {}", n + 1), EvidenceType::Document);
        if n < 19 {
            item.status = EvidenceStatus::Approved;
        }
        core.evidence.save(item).unwrap();
    }

    core
}

/// Add an overdue calendar event
pub fn add_overdue_event(core: &ComplianceCore) {
    core.calendar
        .save(CalendarEvent::new(
            "Missed quarterly review",
            EventType::Review,
            chrono::Utc::now() - chrono::Duration::days(10),
        ))
        .unwrap();
}

/// Add a team with mostly incomplete tasks
pub fn add_disengaged_team(core: &ComplianceCore) {
    core.team
        .save_member(TeamMember::new("Dana", "ISSO"))
        .unwrap();
    for n in 0..4 {
        let mut task = TeamTask::new(&format!("Task {}", n + 1));
        if n == 0 {
            task.status = TaskStatus::Done;
        }
        core.team.save_task(task).unwrap();
    }
}

/// Assessment carrying a 16-point and a 25-point risk
pub fn worst_case_assessment() -> Assessment {
    let mut assessment = Assessment::new("Annual risk assessment", AssessmentKind::RiskAssessment);
    assessment.add_risk(Risk::new(
        "Stolen laptop",
        "physical",
        RiskLevel::High,
        RiskLevel::High,
    ));
    assessment.add_risk(Risk::new(
        "CUI exfiltration",
        "external",
        RiskLevel::VeryHigh,
        RiskLevel::VeryHigh,
    ));
    assessment
}
