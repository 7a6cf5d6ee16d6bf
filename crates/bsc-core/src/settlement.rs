//! Applying payments to invoices
//!
//! The decision (new status, balance) is made here in one place; callers
//! persist the payment and the status change together.

use crate::error::{Error, Result};
use crate::models::{Invoice, InvoiceStatus, Payment, Settlement};
use crate::validate::{validate_invoice, validate_payment};

/// Decide the outcome of recording `payment` against `invoice`
///
/// `prior_payments` may contain payments for other invoices; only those
/// matching the invoice id count toward the total paid.
pub fn settle_payment(
    invoice: &Invoice,
    prior_payments: &[Payment],
    payment: Payment,
) -> Result<Settlement> {
    validate_invoice(invoice)?;
    validate_payment(&payment)?;

    if payment.invoice_id != invoice.id {
        return Err(Error::validation(
            format!("payment for {}", payment.invoice_id),
            "invoice_id",
            format!("does not match invoice {}", invoice.id),
        ));
    }

    if invoice.status.is_cancelled() {
        return Err(Error::InvalidData(format!(
            "Invoice {} is cancelled and cannot take payments",
            invoice.label()
        )));
    }

    let already_paid: f64 = prior_payments
        .iter()
        .filter(|p| p.invoice_id == invoice.id)
        .map(|p| p.amount)
        .sum();
    let total_paid = already_paid + payment.amount;

    let previous_status = invoice.status.clone();
    let status = if total_paid >= invoice.total_amount {
        InvoiceStatus::Paid
    } else {
        previous_status.clone()
    };
    let status_changed = status != previous_status;

    if status_changed {
        tracing::debug!(invoice = %invoice.id, from = %previous_status, to = %status, "Invoice settled");
    }

    Ok(Settlement {
        payment,
        total_paid,
        balance_due: (invoice.total_amount - total_paid).max(0.0),
        previous_status,
        status,
        status_changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn invoice(status: InvoiceStatus) -> Invoice {
        Invoice::new("inv-1", status, 1000.0, d(), d())
    }

    #[test]
    fn test_partial_then_full_payment() {
        let inv = invoice(InvoiceStatus::Sent);

        let first = settle_payment(&inv, &[], Payment::new("inv-1", 400.0, d())).unwrap();
        assert_eq!(first.status, InvoiceStatus::Sent);
        assert!(!first.status_changed);
        assert_eq!(first.balance_due, 600.0);

        let prior = vec![first.payment.clone()];
        let second = settle_payment(&inv, &prior, Payment::new("inv-1", 600.0, d())).unwrap();
        assert_eq!(second.status, InvoiceStatus::Paid);
        assert_eq!(second.previous_status, InvoiceStatus::Sent);
        assert!(second.status_changed);
        assert_eq!(second.total_paid, 1000.0);
        assert_eq!(second.balance_due, 0.0);
    }

    #[test]
    fn test_overpayment_clamps_balance() {
        let inv = invoice(InvoiceStatus::Overdue);
        let s = settle_payment(&inv, &[], Payment::new("inv-1", 1200.0, d())).unwrap();
        assert_eq!(s.status, InvoiceStatus::Paid);
        assert_eq!(s.balance_due, 0.0);
    }

    #[test]
    fn test_other_invoice_payments_ignored() {
        let inv = invoice(InvoiceStatus::Sent);
        let prior = vec![Payment::new("inv-2", 900.0, d())];
        let s = settle_payment(&inv, &prior, Payment::new("inv-1", 200.0, d())).unwrap();
        assert_eq!(s.total_paid, 200.0);
        assert_eq!(s.status, InvoiceStatus::Sent);
    }

    #[test]
    fn test_cancelled_rejected() {
        let inv = invoice(InvoiceStatus::Cancelled);
        let err = settle_payment(&inv, &[], Payment::new("inv-1", 10.0, d())).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_invalid_payments_rejected() {
        let inv = invoice(InvoiceStatus::Sent);
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = settle_payment(&inv, &[], Payment::new("inv-1", amount, d())).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "amount {}", amount);
        }

        let err = settle_payment(&inv, &[], Payment::new("inv-9", 10.0, d())).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "invoice_id", .. }));
    }

    #[test]
    fn test_paid_invoice_stays_paid() {
        let inv = invoice(InvoiceStatus::Paid);
        let s = settle_payment(&inv, &[], Payment::new("inv-1", 5.0, d())).unwrap();
        assert_eq!(s.status, InvoiceStatus::Paid);
        assert!(!s.status_changed);
    }
}
