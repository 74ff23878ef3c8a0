//! Dashboard assembly over the demo document plus wire-format spot checks.

use std::path::Path;

use rust_decimal::Decimal;

use costdeck::fixtures;
use costdeck::loader::{self, LoadError};
use costdeck::models::Project;
use costdeck::report::build_dashboard;

#[test]
fn demo_dashboard_sections_agree() {
    let loaded = fixtures::demo_project().unwrap();
    let dashboard = build_dashboard(&loaded.project, &loaded.findings);

    assert_eq!(dashboard.code, "PRJ-042");
    assert_eq!(dashboard.totals.budget, Decimal::from(120_000));
    assert_eq!(dashboard.actuals.total, dashboard.totals.actual);
    assert_eq!(dashboard.phases.len(), 8);
    assert_eq!(dashboard.bid_packages.len(), 4);
    assert_eq!(dashboard.milestones.total, 9);
    assert_eq!(dashboard.schedule.len(), 9);
    assert_eq!(dashboard.cashflow.len(), 8);
    assert_eq!(dashboard.decision_queue.len(), 7);
    assert_eq!(dashboard.findings.len(), 7);

    let counted: usize = dashboard.actuals_by_type.iter().map(|t| t.count).sum();
    assert_eq!(counted, 33);
    let amount: Decimal = dashboard.actuals_by_type.iter().map(|t| t.amount).sum();
    assert_eq!(amount, dashboard.totals.actual);
}

#[test]
fn dashboard_json_uses_camel_case_keys() {
    let loaded = fixtures::demo_project().unwrap();
    let dashboard = build_dashboard(&loaded.project, &loaded.findings);
    let value = serde_json::to_value(&dashboard).unwrap();

    assert!(value.get("costToComplete").is_some());
    assert!(value.get("budgetUsedPercent").is_some());
    assert!(value["sov"].get("percentComplete").is_some());
    assert!(value["commitments"].get("approvedCos").is_some());
    assert!(value["wip"].get("grossProfitPct").is_some());
    assert!(value["payApps"].get("netPayment").is_some());
    assert_eq!(value["decisionQueue"][0]["kind"], "needs_bid_selection");
    assert_eq!(value["findings"][0]["check"], "commitment_mismatch");
}

#[test]
fn project_document_keys_survive_reserialization() {
    let project: Project = serde_json::from_str(fixtures::DEMO_PROJECT_JSON).unwrap();
    let value = serde_json::to_value(&project).unwrap();

    assert_eq!(value["start_date"], "2025-09-15");
    assert!(value.get("changeLog").is_some());
    let phase = &value["phases"][0];
    assert!(phase.get("percentComplete").is_some());
    assert!(phase["costCodes"][0].get("lineItems").is_some());
    let commitment = &value["commitments"][0];
    assert!(commitment.get("approvedCOs").is_some());
    assert!(commitment.get("type").is_some());
    let line = &value["pay_apps"][0]["lines"][0];
    assert!(line.get("sovLine").is_some());
    assert!(line.get("thisperiod").is_some());
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join("costdeck_demo_copy.json");
    std::fs::write(&path, fixtures::DEMO_PROJECT_JSON).unwrap();
    let loaded = loader::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.project.code, "PRJ-042");
    assert_eq!(loaded.findings.len(), 7);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = loader::from_json_file(Path::new("/nonexistent/costdeck.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
