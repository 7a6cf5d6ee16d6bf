//! CSV import for invoices and expenses
//!
//! Columns are located by header name, so extra or reordered columns are
//! tolerated. Required values that are missing or unparseable fail the whole
//! import with an error naming the row.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use sha2::{Digest, Sha256};
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Expense, Invoice, InvoiceStatus};
use crate::validate::{validate_expense, validate_invoice};

/// Expected invoice header
pub const INVOICE_HEADER: &str = "id,invoice_number,customer,status,total_amount,issue_date,due_date";

/// Expected expense header
pub const EXPENSE_HEADER: &str = "id,description,amount,category,date";

/// Header name to column index
struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn new(headers: StringRecord) -> Self {
        Self { headers }
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Trimmed, non-empty value of a column
    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index(name)
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn require<'r>(&self, record: &'r StringRecord, name: &str, row: usize) -> Result<&'r str> {
        self.get(record, name)
            .ok_or_else(|| Error::Import(format!("row {}: missing {}", row, name)))
    }
}

/// Parse invoices from CSV
pub fn parse_invoices_csv<R: Read>(reader: R) -> Result<Vec<Invoice>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?.clone());
    let mut invoices = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let id = columns.require(&record, "id", row)?.to_string();
        let total_amount = parse_amount(columns.require(&record, "total_amount", row)?)
            .map_err(|e| at_row(row, e))?;
        let issue_date = parse_date(columns.require(&record, "issue_date", row)?)
            .map_err(|e| at_row(row, e))?;
        let due_date = parse_date(columns.require(&record, "due_date", row)?)
            .map_err(|e| at_row(row, e))?;

        let status = columns
            .get(&record, "status")
            .map(|s| InvoiceStatus::from(s.to_string()))
            .unwrap_or_default();

        let invoice = Invoice {
            id,
            invoice_number: columns.get(&record, "invoice_number").map(String::from),
            customer_name: columns.get(&record, "customer").map(String::from),
            status,
            total_amount,
            issue_date,
            due_date,
        };
        validate_invoice(&invoice)?;
        invoices.push(invoice);
    }

    debug!("Parsed {} invoices", invoices.len());
    Ok(invoices)
}

/// Parse expenses from CSV
///
/// Rows without an id get a stable one derived from their content and
/// position, so re-importing the same file yields the same ids.
pub fn parse_expenses_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?.clone());
    let mut expenses = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let amount = parse_amount(columns.require(&record, "amount", row)?)
            .map_err(|e| at_row(row, e))?;
        let date =
            parse_date(columns.require(&record, "date", row)?).map_err(|e| at_row(row, e))?;
        let category = columns
            .get(&record, "category")
            .unwrap_or("Uncategorized")
            .to_string();
        let description = columns.get(&record, "description").map(String::from);

        let id = match columns.get(&record, "id") {
            Some(id) => id.to_string(),
            None => generate_expense_id(&date, description.as_deref(), amount, &category, i),
        };

        let expense = Expense {
            id: Some(id),
            description,
            amount,
            category,
            date,
        };
        validate_expense(&expense)?;
        expenses.push(expense);
    }

    debug!("Parsed {} expenses", expenses.len());
    Ok(expenses)
}

fn at_row(row: usize, err: Error) -> Error {
    match err {
        Error::Import(msg) => Error::Import(format!("row {}: {}", row, msg)),
        other => other,
    }
}

/// Stable id for an expense row that has none
fn generate_expense_id(
    date: &NaiveDate,
    description: Option<&str>,
    amount: f64,
    category: &str,
    index: usize,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.unwrap_or("").as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update(category.as_bytes());
    hasher.update((index as u64).to_be_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("exp-{}", &digest[..12])
}

/// Parse a date in ISO or US format
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s.trim().replace(['$', ',', ' '], "");

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::Import(format!("Unable to parse amount: {}", s))),
    }
}
