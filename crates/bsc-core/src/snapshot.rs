//! On-disk snapshot of one business's records
//!
//! A snapshot is a single JSON document. Saves go through a temp file in the
//! target directory followed by a rename, so readers see either the old
//! document or the new one.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Business, Expense, Invoice, InvoiceStatus, Payment, Settlement};
use crate::settlement::settle_payment;
use crate::validate::{normalize_currency, validate_expenses, validate_invoices, validate_payment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub business: Business,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Snapshot {
    pub fn new(business: Business) -> Self {
        Self {
            business,
            invoices: vec![],
            expenses: vec![],
            payments: vec![],
        }
    }

    /// Read and validate a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            invoices = snapshot.invoices.len(),
            expenses = snapshot.expenses.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Parse and validate a snapshot document
    pub fn from_json(content: &str) -> Result<Self> {
        let mut snapshot: Self = serde_json::from_str(content)?;
        snapshot.normalize()?;
        Ok(snapshot)
    }

    /// Upper-case the currency code and validate every record
    pub fn normalize(&mut self) -> Result<()> {
        self.business.currency = normalize_currency(&self.business.currency)?;
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        validate_invoices(&self.invoices)?;
        validate_expenses(&self.expenses)?;
        self.payments.iter().try_for_each(validate_payment)
    }

    /// Write the snapshot atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        info!(path = %path.display(), "Snapshot saved");
        Ok(())
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    /// Record a payment and update the invoice status in one step
    pub fn apply_payment(&mut self, payment: Payment) -> Result<Settlement> {
        let index = self
            .invoices
            .iter()
            .position(|i| i.id == payment.invoice_id)
            .ok_or_else(|| Error::NotFound(format!("Invoice {}", payment.invoice_id)))?;

        let settlement = settle_payment(&self.invoices[index], &self.payments, payment)?;

        self.payments.push(settlement.payment.clone());
        self.invoices[index].status = settlement.status.clone();

        Ok(settlement)
    }

    /// Sample data for trying the tool without a data file
    pub fn demo(today: NaiveDate) -> Self {
        let mut snapshot = Self::new(Business::new("demo", "Demo Corp"));

        let expense = |id: &str, description: &str, amount: f64, category: &str| Expense {
            id: Some(id.to_string()),
            description: Some(description.to_string()),
            amount,
            category: category.to_string(),
            date: today,
        };
        snapshot.expenses = vec![
            expense("exp-demo-1", "Hosting", 150.00, "Software"),
            expense("exp-demo-2", "Office Supplies", 45.50, "Office"),
            expense("exp-demo-3", "Client Lunch", 85.00, "Meals"),
        ];

        let mut paid = Invoice::new("inv-demo-1", InvoiceStatus::Paid, 5000.00, today, today);
        paid.invoice_number = Some("INV-1001".to_string());
        let mut sent = Invoice::new(
            "inv-demo-2",
            InvoiceStatus::Sent,
            2500.00,
            today,
            today + Duration::days(7),
        );
        sent.invoice_number = Some("INV-1002".to_string());
        snapshot.invoices = vec![paid, sent];

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_demo_contents() {
        let demo = Snapshot::demo(today());
        assert_eq!(demo.business.name, "Demo Corp");
        assert_eq!(demo.business.currency, "USD");
        assert_eq!(demo.expenses.len(), 3);
        assert_eq!(demo.invoices[1].label(), "INV-1002");
        assert_eq!(
            demo.invoices[1].due_date,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        assert!(demo.payments.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("bsc.json");

        let demo = Snapshot::demo(today());
        demo.save(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded, demo);

        // Only the snapshot remains, no stray temp files
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_load_defaults() {
        let json = r#"{
            "business": {"id": "b1", "name": "Shop", "currency": "eur"},
            "invoices": [
                {"id": "i1", "status": "sent", "total_amount": 10.0,
                 "issue_date": "2024-01-01", "due_date": "2024-01-31"}
            ]
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.business.currency, "EUR");
        assert!(snapshot.expenses.is_empty());
        assert!(snapshot.payments.is_empty());
    }

    #[test]
    fn test_normalize_deserialized_snapshot() {
        let mut snapshot: Snapshot = serde_json::from_str(
            r#"{"business": {"id": "b1", "name": "Shop", "currency": " eur "}}"#,
        )
        .unwrap();
        snapshot.normalize().unwrap();
        assert_eq!(snapshot.business.currency, "EUR");

        snapshot.business.currency = "euro".into();
        assert!(snapshot.normalize().is_err());
    }

    #[test]
    fn test_load_rejects_negative_amounts() {
        let json = r#"{
            "business": {"id": "b1", "name": "Shop"},
            "expenses": [{"amount": -1.0, "category": "Office", "date": "2024-01-01"}]
        }"#;

        let err = Snapshot::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_apply_payment_updates_status() {
        let mut snapshot = Snapshot::demo(today());

        let settlement = snapshot
            .apply_payment(Payment::new("inv-demo-2", 2500.0, today()))
            .unwrap();

        assert!(settlement.status_changed);
        assert_eq!(snapshot.payments.len(), 1);
        assert_eq!(
            snapshot.invoice("inv-demo-2").unwrap().status,
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_apply_payment_unknown_invoice() {
        let mut snapshot = Snapshot::demo(today());
        let err = snapshot
            .apply_payment(Payment::new("missing", 1.0, today()))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(snapshot.payments.is_empty());
    }

    #[test]
    fn test_failed_payment_leaves_snapshot_untouched() {
        let mut snapshot = Snapshot::demo(today());
        let before = snapshot.clone();

        assert!(snapshot
            .apply_payment(Payment::new("inv-demo-2", f64::NAN, today()))
            .is_err());
        assert_eq!(snapshot, before);
    }
}
