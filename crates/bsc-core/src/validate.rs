//! Fail-fast checks for records entering the analytics
//!
//! Anything that would silently turn a total into NaN is rejected here.

use crate::error::{Error, Result};
use crate::models::{Expense, Invoice, Payment};

/// Check that an amount is a finite, non-negative number
pub fn check_amount(record: &str, field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(record, field, format!("not a number ({})", value)));
    }
    if value < 0.0 {
        return Err(Error::validation(record, field, format!("negative ({})", value)));
    }
    Ok(())
}

pub fn validate_invoice(invoice: &Invoice) -> Result<()> {
    check_amount(
        &format!("invoice {}", invoice.label()),
        "total_amount",
        invoice.total_amount,
    )
}

pub fn validate_expense(expense: &Expense) -> Result<()> {
    check_amount(
        &format!("expense {}", expense.label()),
        "amount",
        expense.amount,
    )
}

pub fn validate_invoices(invoices: &[Invoice]) -> Result<()> {
    invoices.iter().try_for_each(validate_invoice)
}

pub fn validate_expenses(expenses: &[Expense]) -> Result<()> {
    expenses.iter().try_for_each(validate_expense)
}

/// Payments must carry a strictly positive amount
pub fn validate_payment(payment: &Payment) -> Result<()> {
    let record = format!("payment for invoice {}", payment.invoice_id);
    check_amount(&record, "amount", payment.amount)?;
    if payment.amount == 0.0 {
        return Err(Error::validation(record, "amount", "must be greater than zero"));
    }
    Ok(())
}

/// Normalise a currency code to upper case, rejecting anything that is not three letters
pub fn normalize_currency(code: &str) -> Result<String> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::validation(
            "business",
            "currency",
            format!("'{}' is not a three-letter currency code", code),
        ));
    }
    Ok(code.to_ascii_uppercase())
}
