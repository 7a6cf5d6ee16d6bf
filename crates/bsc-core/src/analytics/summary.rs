//! Headline dashboard totals

use crate::error::Result;
use crate::models::{DashboardSummary, Expense, Invoice};
use crate::validate::{validate_expenses, validate_invoices};

/// Compute revenue, expenses, receivables, profit and invoice yield
///
/// Unlike the health chart, revenue here is collected revenue: only paid
/// invoices count.
pub fn summarize(invoices: &[Invoice], expenses: &[Expense]) -> Result<DashboardSummary> {
    validate_invoices(invoices)?;
    validate_expenses(expenses)?;

    let total_revenue: f64 = invoices
        .iter()
        .filter(|i| i.status.is_paid())
        .map(|i| i.total_amount)
        .sum();

    let accounts_receivable: f64 = invoices
        .iter()
        .filter(|i| i.status.is_open())
        .map(|i| i.total_amount)
        .sum();

    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();

    let billed = total_revenue + accounts_receivable;
    let invoice_yield = if billed > 0.0 {
        total_revenue / billed * 100.0
    } else {
        0.0
    };

    Ok(DashboardSummary {
        total_revenue,
        total_expenses,
        accounts_receivable,
        profit: total_revenue - total_expenses,
        invoice_yield,
        invoice_count: invoices.len(),
        expense_count: expenses.len(),
    })
}
