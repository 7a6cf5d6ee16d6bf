//! Integration tests for bsc-core
//!
//! These tests exercise the full import → analyse → settle workflow.

use bsc_core::{
    analytics::Dashboard,
    compute_financial_health, generate_insights,
    import::{parse_expenses_csv, parse_invoices_csv},
    summarize, AnalyticsConfig, Business, InsightAction, InsightKind, InvoiceStatus, Payment,
    Snapshot,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 3, 20)
}

/// One paid, one overdue, one cancelled and one current invoice
fn invoices_csv() -> &'static str {
    r#"id,invoice_number,customer,status,total_amount,issue_date,due_date
inv-1,INV-1001,Acme,paid,"$1,000.00",2024-01-10,2024-02-10
inv-2,INV-1002,Globex,sent,2000,2024-02-05,2024-03-05
inv-3,INV-1003,Initech,cancelled,500,2024-03-01,2024-03-31
inv-4,INV-1004,Umbrella,sent,600,03/15/2024,04/15/2024"#
}

/// Rent dominates spending at 67%
fn expenses_csv() -> &'static str {
    r#"id,description,amount,category,date
,Hosting,300,Software,2024-01-12
,Hosting,300,Software,2024-02-12
,March rent,"1,200.00",Rent,2024-03-02"#
}

fn imported_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new(Business::new("acme", "Acme Consulting"));
    snapshot.invoices = parse_invoices_csv(invoices_csv().as_bytes()).expect("invoices parse");
    snapshot.expenses = parse_expenses_csv(expenses_csv().as_bytes()).expect("expenses parse");
    snapshot
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Analytics
// =============================================================================

#[test]
fn test_health_from_imported_data() {
    let snapshot = imported_snapshot();

    let points = compute_financial_health(&snapshot.invoices, &snapshot.expenses, today())
        .expect("health");

    assert_eq!(points.len(), 7);
    let periods: Vec<&str> = points.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(
        periods,
        vec!["2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03", "2024-04"]
    );

    // Cancelled invoice excluded from March
    assert_close(points[3].revenue, 1000.0);
    assert_close(points[4].revenue, 2000.0);
    assert_close(points[5].revenue, 600.0);
    assert_close(points[5].expenses, 1200.0);
    assert_close(points[5].profit, -600.0);

    let forecast = &points[6];
    assert!(forecast.is_projected);
    assert_eq!(forecast.month, "Apr");
    assert_close(forecast.revenue, 1320.0);
    assert_close(forecast.expenses, 630.0);
}

#[test]
fn test_insights_from_imported_data() {
    let snapshot = imported_snapshot();

    let insights = generate_insights(&snapshot.invoices, &snapshot.expenses, "USD", today())
        .expect("insights");

    assert_eq!(insights.len(), 3);
    assert_eq!(
        insights[0].message,
        "You have $2,600.00 in outstanding invoices."
    );
    assert_eq!(
        insights[1].message,
        "Your highest expense is Rent (67% of total). Consider looking for cost-saving opportunities here."
    );
    assert_eq!(insights[2].action, Some(InsightAction::EditTerms));
}

// =============================================================================
// Settlement and persistence
// =============================================================================

#[test]
fn test_settle_save_reload_workflow() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bsc.json");

    imported_snapshot().save(&path).expect("save");

    // Pay the overdue invoice in two instalments
    let mut snapshot = Snapshot::load(&path).expect("load");
    let first = snapshot
        .apply_payment(Payment::new("inv-2", 1500.0, today()))
        .expect("first payment");
    assert_eq!(first.status, InvoiceStatus::Sent);
    assert_close(first.balance_due, 500.0);

    let second = snapshot
        .apply_payment(Payment::new("inv-2", 500.0, today()))
        .expect("second payment");
    assert!(second.status_changed);
    assert_eq!(second.status, InvoiceStatus::Paid);
    snapshot.save(&path).expect("save settled");

    let reloaded = Snapshot::load(&path).expect("reload");
    assert_eq!(reloaded.payments.len(), 2);
    assert_eq!(
        reloaded.invoice("inv-2").map(|i| i.status.clone()),
        Some(InvoiceStatus::Paid)
    );

    // Only the current invoice is still owed, and nothing is overdue
    let insights = generate_insights(&reloaded.invoices, &reloaded.expenses, "USD", today())
        .expect("insights");
    let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![InsightKind::Warning, InsightKind::Suggestion]);
    assert_eq!(insights[0].message, "You have $600.00 in outstanding invoices.");

    let summary = summarize(&reloaded.invoices, &reloaded.expenses).expect("summary");
    assert_close(summary.total_revenue, 3000.0);
    assert_close(summary.accounts_receivable, 600.0);
}

#[test]
fn test_settling_everything_is_healthy() {
    let mut snapshot = imported_snapshot();
    snapshot
        .apply_payment(Payment::new("inv-2", 2000.0, today()))
        .unwrap();
    snapshot
        .apply_payment(Payment::new("inv-4", 600.0, today()))
        .unwrap();

    let insights =
        generate_insights(&snapshot.invoices, &snapshot.expenses, "USD", today()).unwrap();

    assert_eq!(insights.len(), 2);
    assert_eq!(insights[1].kind, InsightKind::Success);
    assert!(!insights.iter().any(|i| i.action == Some(InsightAction::ReviewAr)));
}

#[test]
fn test_cancelled_invoice_cannot_be_settled() {
    let mut snapshot = imported_snapshot();
    assert!(snapshot
        .apply_payment(Payment::new("inv-3", 500.0, today()))
        .is_err());
    assert!(snapshot.payments.is_empty());
}

// =============================================================================
// Dashboard bundle
// =============================================================================

#[test]
fn test_dashboard_uses_business_currency() {
    let mut snapshot = imported_snapshot();
    snapshot.business = Business::new("acme", "Acme").with_currency("GBP");

    let dashboard =
        Dashboard::build(&snapshot, today(), &AnalyticsConfig::default()).expect("dashboard");

    assert_eq!(
        dashboard.insights[0].message,
        "You have £2,600.00 in outstanding invoices."
    );
    assert_eq!(dashboard.financial_health.len(), 7);
    assert_eq!(dashboard.summary.invoice_count, 4);
}

#[test]
fn test_shorter_window_from_config() {
    let snapshot = imported_snapshot();
    let config = AnalyticsConfig {
        window_months: 2,
        ..AnalyticsConfig::default()
    };

    let dashboard = Dashboard::build(&snapshot, today(), &config).unwrap();
    assert_eq!(dashboard.financial_health.len(), 3);
    // Lookback clamps to the two available months
    assert_close(dashboard.financial_health[2].revenue, 1300.0 * 1.10);
}
