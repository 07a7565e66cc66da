//! Backup is all-or-nothing; restore replaces every collection.

use custodian::domain::entities::{EventType, TeamMeeting};
use custodian::{RestoreError, RiskLevel};

use crate::common;

#[test]
fn restore_of_a_fresh_backup_reproduces_every_collection() {
    let source = common::rated_core();
    common::add_overdue_event(&source);
    common::add_disengaged_team(&source);
    source
        .assessments
        .save(common::worst_case_assessment())
        .unwrap();
    source
        .team
        .save_meeting(TeamMeeting::new("Kickoff", chrono::Utc::now()))
        .unwrap();
    source
        .store()
        .mutate(|s| s.settings.organization = "Acme Defense".to_string())
        .unwrap();

    let backup = source.store().create_backup().unwrap();

    let target = common::memory_core();
    target.store().restore_from_backup(&backup).unwrap();

    assert_eq!(target.store().snapshot(), source.store().snapshot());
    // Derived fields came through intact.
    let restored = &target.assessments.all()[0];
    assert_eq!(restored.overall_risk_level, RiskLevel::VeryHigh);
}

#[test]
fn backup_is_self_describing_json() {
    let core = common::rated_core();
    let backup = core.store().create_backup().unwrap();

    let value: serde_json::Value = serde_json::from_str(&backup).unwrap();
    assert_eq!(value["version"], 1);
    assert!(value["backup_id"].is_string());
    assert!(value["backup_date"].is_string());
    assert!(value["digest"].as_str().unwrap().starts_with("sha256:"));
    assert!(value["controls"].is_array());
    assert!(value["policies"].is_array());
}

#[test]
fn rejected_restores_leave_the_store_untouched() {
    let core = common::rated_core();
    let before = core.store().snapshot();

    for payload in [
        "not valid json",
        "[1, 2, 3]",
        r#"{"assets": []}"#,
        r#"{"version": 1, "backup_id": "b", "backup_date": 7}"#,
    ] {
        assert!(core.store().restore_from_backup(payload).is_err());
        assert_eq!(core.store().snapshot(), before);
    }
}

#[test]
fn restore_failure_modes_map_to_distinct_errors() {
    let core = common::rated_core();
    let backup = core.store().create_backup().unwrap();

    let malformed = core.store().restore_from_backup("{{{").unwrap_err();
    assert!(matches!(malformed, RestoreError::Malformed(_)));

    let not_backup = core
        .store()
        .restore_from_backup(r#"{"calendar_events": []}"#)
        .unwrap_err();
    assert!(matches!(not_backup, RestoreError::NotABackup));

    let mut wrong_version: serde_json::Value = serde_json::from_str(&backup).unwrap();
    wrong_version["version"] = serde_json::json!(2);
    let err = core
        .store()
        .restore_from_backup(&wrong_version.to_string())
        .unwrap_err();
    assert!(matches!(err, RestoreError::UnsupportedVersion { found: 2, .. }));

    let mut tampered: serde_json::Value = serde_json::from_str(&backup).unwrap();
    tampered["policies"] = serde_json::json!([]);
    let err = core
        .store()
        .restore_from_backup(&tampered.to_string())
        .unwrap_err();
    assert!(matches!(err, RestoreError::DigestMismatch));
}

#[test]
fn calendar_events_round_trip_through_backup() {
    let core = common::memory_core();
    core.calendar
        .save(custodian::CalendarEvent::new(
            "CMMC audit",
            EventType::Audit,
            chrono::Utc::now() + chrono::Duration::days(30),
        ))
        .unwrap();

    let backup = core.store().create_backup().unwrap();
    let target = common::memory_core();
    target.store().restore_from_backup(&backup).unwrap();

    assert_eq!(target.calendar.all().len(), 1);
    assert_eq!(target.calendar.all()[0].title, "CMMC audit");
}
