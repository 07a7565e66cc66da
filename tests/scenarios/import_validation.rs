//! Import validates records individually; restore stays all-or-nothing.

use custodian::domain::entities::{Asset, AssetType};
use custodian::RiskLevel;

use crate::common;

#[test]
fn invalid_json_import_reports_failure_and_mutates_nothing() {
    let core = common::memory_core();
    core.assets
        .save(Asset::new("existing", AssetType::Hardware))
        .unwrap();
    let before = core.store().snapshot();

    let report = core.store().import_assets("not valid json");

    assert!(!report.success);
    assert_eq!(report.imported, 0);
    assert!(!report.errors.is_empty());
    assert_eq!(core.store().snapshot(), before);
}

#[test]
fn valid_records_import_while_invalid_ones_are_reported() {
    let core = common::memory_core();

    let report = core.store().import_assets(
        r#"[
            {"name": "laptop-07", "asset_type": "hardware", "criticality": "very-high"},
            {"asset_type": "software"},
            {"name": "bad-enum", "asset_type": "quantum"},
            {"name": "share-01", "asset_type": "data"}
        ]"#,
    );

    assert!(report.success);
    assert_eq!(report.imported, 2);
    assert_eq!(report.errors.len(), 2);

    let assets = core.assets.all();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].name, "laptop-07");
    assert_eq!(assets[0].criticality, RiskLevel::VeryHigh);
    assert_eq!(assets[1].name, "share-01");
    assert!(assets.iter().all(|a| !a.id.is_empty()));
}

#[test]
fn exchange_export_reimports_into_an_identical_store() {
    let core = common::rated_core();
    common::add_overdue_event(&core);
    core.assessments
        .save(common::worst_case_assessment())
        .unwrap();

    let exported = core.store().export_all().unwrap();
    let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(value["format"], "custodian-export");

    let target = common::memory_core();
    let report = target.store().import_all(&exported);
    assert!(report.success);
    assert!(report.errors.is_empty());
    assert_eq!(target.store().snapshot(), core.store().snapshot());
}

#[test]
fn import_all_replaces_only_collections_present_in_the_payload() {
    let core = common::memory_core();
    core.assets
        .save(Asset::new("keep-me", AssetType::Hardware))
        .unwrap();
    core.policies
        .save(custodian::Policy::new("Replace me", "governance"))
        .unwrap();

    let report = core
        .store()
        .import_all(r#"{"policies": [{"title": "Fresh policy"}]}"#);
    assert!(report.success);
    assert_eq!(report.imported, 1);

    // Assets untouched, policies replaced.
    assert_eq!(core.assets.all().len(), 1);
    let policies = core.policies.all();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0].title, "Fresh policy");
}

#[test]
fn import_tolerates_missing_optional_fields_with_safe_defaults() {
    let core = common::memory_core();
    let report = core
        .store()
        .import_all(r#"{"controls": [{"title": "Bare control"}]}"#);
    assert!(report.success);

    let control = &core.controls.all()[0];
    assert_eq!(control.title, "Bare control");
    assert!(!control.id.is_empty());
    assert_eq!(
        control.status,
        custodian::domain::entities::ControlStatus::NotImplemented
    );
}
