//! Report command implementations

use anyhow::Result;
use bsc_core::{
    compute_financial_health_with, format_money, generate_insights_with, summarize,
    AnalyticsConfig, Dashboard, DashboardSummary, FinancialHealthPoint, Insight, InsightKind,
    Snapshot,
};
use chrono::NaiveDate;
use serde_json::Value;

use super::truncate;

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn insight_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "⚠️ ",
        InsightKind::Suggestion => "💡",
        InsightKind::Success => "✅",
    }
}

pub fn cmd_dashboard(
    snapshot: &Snapshot,
    today: NaiveDate,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let dashboard = Dashboard::build(snapshot, today, config)?;

    if json {
        return print_json(&dashboard);
    }

    println!();
    println!("🏢 {} - dashboard as of {}", dashboard.business.name, dashboard.as_of);
    print_summary(&dashboard.summary, &dashboard.business.currency)?;
    print_insights(&dashboard.insights);
    print_health(&dashboard.financial_health, &dashboard.business.currency)?;

    Ok(())
}

pub fn cmd_insights(
    snapshot: &Snapshot,
    today: NaiveDate,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let insights = generate_insights_with(
        &snapshot.invoices,
        &snapshot.expenses,
        &snapshot.business.currency,
        today,
        config,
    )?;

    if json {
        return print_json(&insights);
    }

    print_insights(&insights);
    Ok(())
}

pub fn cmd_health(
    snapshot: &Snapshot,
    today: NaiveDate,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let points =
        compute_financial_health_with(&snapshot.invoices, &snapshot.expenses, today, config)?;

    if json {
        return print_json(&points);
    }

    print_health(&points, &snapshot.business.currency)
}

pub fn cmd_summary(snapshot: &Snapshot, json: bool) -> Result<()> {
    let summary = summarize(&snapshot.invoices, &snapshot.expenses)?;

    if json {
        // Include the currency so machine consumers can format amounts
        let mut value = serde_json::to_value(&summary)?;
        if let Value::Object(ref mut map) = value {
            map.insert(
                "currency".to_string(),
                Value::String(snapshot.business.currency.clone()),
            );
        }
        return print_json(&value);
    }

    print_summary(&summary, &snapshot.business.currency)
}

fn print_summary(summary: &DashboardSummary, currency: &str) -> Result<()> {
    println!();
    println!("📊 Summary");
    println!("   ─────────────────────────────────────────");
    println!("   Revenue (collected):  {:>16}", format_money(summary.total_revenue, currency)?);
    println!("   Expenses:             {:>16}", format_money(summary.total_expenses, currency)?);
    println!("   Accounts receivable:  {:>16}", format_money(summary.accounts_receivable, currency)?);
    println!("   Profit:               {:>16}", format_money(summary.profit, currency)?);
    println!("   Invoice yield:        {:>15.1}%", summary.invoice_yield);
    println!(
        "   Records:              {} invoices, {} expenses",
        summary.invoice_count, summary.expense_count
    );
    Ok(())
}

fn print_insights(insights: &[Insight]) {
    println!();
    println!("🔎 Insights");
    println!("   ─────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing to report yet. Add invoices or expenses to see insights.");
        return;
    }

    for insight in insights {
        println!("   {} {}", insight_icon(insight.kind), insight.message);
        if let Some(action) = insight.action {
            println!("      → {} ({})", action.label(), action.route());
        }
    }
}

fn print_health(points: &[FinancialHealthPoint], currency: &str) -> Result<()> {
    println!();
    println!("📈 Financial Health");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:9} │ {:>14} │ {:>14} │ {:>14}",
        "Month", "Revenue", "Expenses", "Profit"
    );
    println!("   ──────────┼────────────────┼────────────────┼───────────────");

    for point in points {
        let month = if point.is_projected {
            format!("{}*", point.month)
        } else {
            point.month.clone()
        };
        println!(
            "   {:9} │ {:>14} │ {:>14} │ {:>14}",
            truncate(&month, 9),
            format_money(point.revenue, currency)?,
            format_money(point.expenses, currency)?,
            format_money(point.profit, currency)?
        );
    }

    println!();
    println!("   * projected from the recent monthly average");
    Ok(())
}
