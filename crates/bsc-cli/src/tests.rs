//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use bsc_core::{AnalyticsConfig, InvoiceStatus, Payment, Snapshot};
use chrono::NaiveDate;
use tempfile::TempDir;

use crate::commands::{self, truncate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Import a small snapshot into `dir`, returning its path
fn setup_snapshot(dir: &Path) -> PathBuf {
    let invoices = write_file(
        dir,
        "invoices.csv",
        "id,invoice_number,customer,status,total_amount,issue_date,due_date
inv-1,INV-1001,Acme,paid,1000,2024-01-10,2024-02-10
inv-2,INV-1002,Globex,sent,2000,2024-02-05,2024-03-05",
    );
    let expenses = write_file(
        dir,
        "expenses.csv",
        "id,description,amount,category,date
,Hosting,300,Software,2024-02-12
,Rent,1200,Rent,2024-03-02",
    );
    let out = dir.join("bsc.json");

    commands::cmd_import(&invoices, &expenses, "Acme Consulting", "usd", &out).unwrap();
    out
}

// ========== Core Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer month label", 9), "a long...");
}

#[test]
fn test_resolve_today() {
    assert_eq!(
        commands::resolve_today(Some("2024-03-20")).unwrap(),
        today()
    );
    assert!(commands::resolve_today(Some("20/03/2024")).is_err());
    assert!(commands::resolve_today(None).is_ok());
}

#[test]
fn test_load_snapshot_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");

    let err = commands::load_snapshot(&missing, false, today()).unwrap_err();
    assert!(err.to_string().contains("bsc import"));

    assert!(commands::load_optional_snapshot(&missing, false, today())
        .unwrap()
        .is_none());
}

#[test]
fn test_load_snapshot_demo_ignores_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");

    let snapshot = commands::load_snapshot(&missing, true, today()).unwrap();
    assert_eq!(snapshot.business.name, "Demo Corp");
}

#[test]
fn test_load_config_default_and_override() {
    let config = commands::load_config(None).unwrap();
    assert_eq!(config.window_months, 6);

    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "analytics.toml", "[insights]\nconcentration_threshold_pct = 50\n");
    let config = commands::load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.concentration_threshold_pct, 50);

    let bad = write_file(dir.path(), "bad.toml", "[health]\nwindow_months = 0\n");
    assert!(commands::load_config(Some(bad.as_path())).is_err());
}

#[test]
fn test_static_dir_str() {
    assert_eq!(commands::static_dir_str(None).unwrap(), None);
    assert_eq!(
        commands::static_dir_str(Some(Path::new("web/dist"))).unwrap(),
        Some("web/dist")
    );
}

#[cfg(unix)]
#[test]
fn test_static_dir_str_rejects_non_utf8() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = Path::new(OsStr::from_bytes(b"web/\xff\xfe"));
    let err = commands::static_dir_str(Some(dir)).unwrap_err();
    assert!(err.to_string().contains("not valid UTF-8"));
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = setup_snapshot(dir.path());

    let snapshot = Snapshot::load(&path).unwrap();
    assert_eq!(snapshot.business.id, "acme-consulting");
    assert_eq!(snapshot.business.currency, "USD");
    assert_eq!(snapshot.invoices.len(), 2);
    assert_eq!(snapshot.expenses.len(), 2);
    assert!(snapshot.expenses.iter().all(|e| e.id.is_some()));
}

#[test]
fn test_cmd_import_bad_currency() {
    let dir = TempDir::new().unwrap();
    let invoices = write_file(dir.path(), "i.csv", "id,invoice_number,customer,status,total_amount,issue_date,due_date\n");
    let expenses = write_file(dir.path(), "e.csv", "id,description,amount,category,date\n");
    let out = dir.path().join("bsc.json");

    assert!(commands::cmd_import(&invoices, &expenses, "X", "dollars", &out).is_err());
    assert!(!out.exists());
}

#[test]
fn test_cmd_import_bad_row_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let invoices = write_file(
        dir.path(),
        "i.csv",
        "id,invoice_number,customer,status,total_amount,issue_date,due_date
inv-1,,,sent,abc,2024-01-01,2024-01-31",
    );
    let expenses = write_file(dir.path(), "e.csv", "id,description,amount,category,date\n");
    let out = dir.path().join("bsc.json");

    let err = commands::cmd_import(&invoices, &expenses, "X", "USD", &out).unwrap_err();
    assert!(format!("{:#}", err).contains("row 1"));
    assert!(!out.exists());
}

#[test]
fn test_business_slug() {
    assert_eq!(commands::business_slug("Acme Consulting, LLC"), "acme-consulting-llc");
    assert_eq!(commands::business_slug("!!!"), "business");
}

// ========== Report Command Tests ==========

#[test]
fn test_report_commands_run() {
    let dir = TempDir::new().unwrap();
    let path = setup_snapshot(dir.path());
    let snapshot = commands::load_snapshot(&path, false, today()).unwrap();
    let config = AnalyticsConfig::default();

    for json in [false, true] {
        commands::cmd_dashboard(&snapshot, today(), &config, json).unwrap();
        commands::cmd_insights(&snapshot, today(), &config, json).unwrap();
        commands::cmd_health(&snapshot, today(), &config, json).unwrap();
        commands::cmd_summary(&snapshot, json).unwrap();
    }
}

#[test]
fn test_report_commands_demo() {
    let snapshot = Snapshot::demo(today());
    let config = AnalyticsConfig::default();
    assert!(commands::cmd_dashboard(&snapshot, today(), &config, false).is_ok());
}

// ========== Settle Command Tests ==========

#[test]
fn test_cmd_settle_persists_payment_and_status() {
    let dir = TempDir::new().unwrap();
    let path = setup_snapshot(dir.path());

    let partial = commands::cmd_settle(&path, Payment::new("inv-2", 500.0, today()), false).unwrap();
    assert!(!partial.status_changed);

    let full = commands::cmd_settle(&path, Payment::new("inv-2", 1500.0, today()), true).unwrap();
    assert!(full.status_changed);

    let snapshot = Snapshot::load(&path).unwrap();
    assert_eq!(snapshot.payments.len(), 2);
    assert_eq!(snapshot.invoice("inv-2").unwrap().status, InvoiceStatus::Paid);
}

#[test]
fn test_cmd_settle_unknown_invoice_keeps_file() {
    let dir = TempDir::new().unwrap();
    let path = setup_snapshot(dir.path());
    let before = fs::read_to_string(&path).unwrap();

    let result = commands::cmd_settle(&path, Payment::new("inv-404", 10.0, today()), false);
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}
