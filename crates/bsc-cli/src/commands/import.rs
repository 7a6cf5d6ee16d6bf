//! Import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use bsc_core::import::{parse_expenses_csv, parse_invoices_csv};
use bsc_core::validate::normalize_currency;
use bsc_core::{Business, Snapshot};

/// Business id derived from its name ("Acme Consulting" -> "acme-consulting")
pub fn business_slug(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "business".to_string()
    } else {
        slug
    }
}

pub fn cmd_import(
    invoices_path: &Path,
    expenses_path: &Path,
    business_name: &str,
    currency: &str,
    out: &Path,
) -> Result<Snapshot> {
    println!("📥 Importing records...");

    let currency = normalize_currency(currency).context("Invalid --currency")?;

    let invoices_file = File::open(invoices_path)
        .with_context(|| format!("Failed to open {}", invoices_path.display()))?;
    let invoices = parse_invoices_csv(invoices_file)
        .with_context(|| format!("Failed to parse {}", invoices_path.display()))?;
    println!("   Invoices: {} from {}", invoices.len(), invoices_path.display());

    let expenses_file = File::open(expenses_path)
        .with_context(|| format!("Failed to open {}", expenses_path.display()))?;
    let expenses = parse_expenses_csv(expenses_file)
        .with_context(|| format!("Failed to parse {}", expenses_path.display()))?;
    println!("   Expenses: {} from {}", expenses.len(), expenses_path.display());

    let business =
        Business::new(business_slug(business_name), business_name).with_currency(currency);
    let mut snapshot = Snapshot::new(business);
    snapshot.invoices = invoices;
    snapshot.expenses = expenses;

    snapshot
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!("✅ Snapshot written to {}", out.display());
    println!();
    println!("Next steps:");
    println!("  1. View the dashboard: bsc --data {} dashboard", out.display());
    println!("  2. Start web UI: bsc --data {} serve", out.display());

    Ok(snapshot)
}
