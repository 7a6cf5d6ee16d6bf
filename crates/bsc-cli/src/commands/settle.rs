//! Settle command implementation

use std::path::Path;

use anyhow::{Context, Result};
use bsc_core::{format_money, Payment, Settlement, Snapshot};

/// Apply a payment to the snapshot file and save it
///
/// The payment and the invoice status change are written in one atomic save.
pub fn cmd_settle(data: &Path, payment: Payment, json: bool) -> Result<Settlement> {
    let mut snapshot = Snapshot::load(data)
        .with_context(|| format!("Failed to load snapshot {}", data.display()))?;

    let invoice_id = payment.invoice_id.clone();
    let settlement = snapshot
        .apply_payment(payment)
        .with_context(|| format!("Failed to settle payment for {}", invoice_id))?;

    snapshot
        .save(data)
        .with_context(|| format!("Failed to write {}", data.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settlement)?);
        return Ok(settlement);
    }

    let currency = snapshot.business.currency.as_str();
    let label = snapshot
        .invoice(&invoice_id)
        .map(|i| i.label().to_string())
        .unwrap_or(invoice_id);

    println!(
        "💰 Recorded {} payment of {} for {}",
        settlement.payment.method,
        format_money(settlement.payment.amount, currency)?,
        label
    );
    println!("   Paid to date: {}", format_money(settlement.total_paid, currency)?);
    println!("   Balance due:  {}", format_money(settlement.balance_due, currency)?);
    if settlement.status_changed {
        println!(
            "   Status: {} → {}",
            settlement.previous_status, settlement.status
        );
    } else {
        println!("   Status: {}", settlement.status);
    }

    Ok(settlement)
}
