//! Validation Tests for External Inputs
//!
//! Runs the order and table validators against the fixture files and the
//! bundled example inputs.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use typed_records::{
    demo, load_order, load_table, DemoConfig, OrderError, OrderTable, OrderValidator, TableError,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

// =============================================================================
// Order Document Tests
// =============================================================================

#[test]
fn test_valid_order_fixture() {
    let order = load_order(fixture("order_valid.json")).expect("valid order");

    assert_eq!(order.name, "rice");
    assert_eq!(
        order.created_at,
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert_eq!(order.price, 200);
}

#[test]
fn test_invalid_order_fixtures_yield_none() {
    for name in ["order_zero_price.json", "order_negative_price.json", "order_bad_timestamp.json"] {
        assert!(load_order(fixture(name)).is_none(), "{} should be rejected", name);
    }
}

#[test]
fn test_invalid_order_reports_cause() {
    let validator = OrderValidator::new().unwrap();

    match validator.validate_file(fixture("order_bad_timestamp.json")) {
        Err(OrderError::Timestamp(raw)) => assert_eq!(raw, "01/01/2022 00:00"),
        other => panic!("Expected Timestamp, got {:?}", other),
    }

    match validator.validate_file(fixture("order_zero_price.json")) {
        Err(OrderError::Violations(violations)) => {
            assert!(violations.iter().any(|v| v.instance_path == "/price"));
        }
        other => panic!("Expected Violations, got {:?}", other),
    }
}

// =============================================================================
// Order Table Tests
// =============================================================================

#[test]
fn test_valid_table_fixture() {
    let table = load_table(fixture("table_valid.csv")).expect("valid table");

    assert_eq!(table.len(), 3);
    let names: Vec<_> = table.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["rice", "bread", "milk"]);
    assert_eq!(table.rows()[2].created_at, "2022-01-03 17:45:59");
    assert_eq!(table.rows()[1].price, 150);
}

#[test]
fn test_invalid_table_fixtures_yield_none() {
    assert!(load_table(fixture("table_bad_price.csv")).is_none());
    assert!(load_table(fixture("table_bad_timestamp.csv")).is_none());
}

#[test]
fn test_invalid_table_reports_failing_row() {
    match OrderTable::from_file(fixture("table_bad_timestamp.csv")) {
        Err(typed_records::Error::Table(TableError::Failures(failures))) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].row, 1);
            assert_eq!(failures[0].column, "created_at");
            assert_eq!(failures[0].value, "2022-01-32 08:30:00");
        }
        other => panic!("Expected Failures, got {:?}", other),
    }
}

// =============================================================================
// Full Demo Tests
// =============================================================================

#[test]
fn test_demo_with_bundled_inputs() {
    let report = demo::run_in(&DemoConfig::default(), Path::new(env!("CARGO_MANIFEST_DIR"))).unwrap();

    assert_eq!(report.order.as_ref().map(|o| o.price), Some(200));
    assert_eq!(report.table.as_ref().map(|t| t.len()), Some(3));
    assert!((report.records.metrics.bmi() - 24.499).abs() < 1e-3);
    assert_eq!(report.sum, 3);
}
