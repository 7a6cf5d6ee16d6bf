//! Data models for bsc
//!
//! Records are read-only snapshots of what the back office stores for one
//! business. Amounts are plain `f64` in the business currency.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default currency when a business has none configured
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

// ========== Business ==========

/// The business (tenant) that owns a set of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    /// ISO 4217-like code, used only for formatting
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Business {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            currency: default_currency(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

// ========== Invoices ==========

/// Invoice lifecycle status
///
/// The stored column is free text, so unknown values are kept verbatim
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
    Other(String),
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Counts toward accounts receivable (neither paid nor cancelled)
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Paid | Self::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "draft" => Self::Draft,
            "sent" => Self::Sent,
            "paid" => Self::Paid,
            "overdue" => Self::Overdue,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for InvoiceStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        status.as_str().to_string()
    }
}

/// An invoice issued to a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub total_amount: f64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl Invoice {
    pub fn new(
        id: impl Into<String>,
        status: InvoiceStatus,
        total_amount: f64,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            invoice_number: None,
            customer_name: None,
            status,
            total_amount,
            issue_date,
            due_date,
        }
    }

    /// Human-facing label: the invoice number when present, else the id
    pub fn label(&self) -> &str {
        self.invoice_number.as_deref().unwrap_or(&self.id)
    }
}

// ========== Expenses ==========

/// A business expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            description: None,
            amount,
            category: category.into(),
            date,
        }
    }

    pub fn label(&self) -> String {
        match (&self.id, &self.description) {
            (Some(id), _) => id.clone(),
            (None, Some(desc)) => desc.clone(),
            (None, None) => format!("{} expense on {}", self.category, self.date),
        }
    }
}

// ========== Payments ==========

fn default_payment_method() -> String {
    "Transfer".to_string()
}

/// A payment recorded against an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub invoice_id: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default = "default_payment_method")]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Payment {
    pub fn new(invoice_id: impl Into<String>, amount: f64, payment_date: NaiveDate) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            amount,
            payment_date,
            method: default_payment_method(),
            reference: None,
            notes: None,
        }
    }
}

// ========== Insights ==========

/// Kind of advisory message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Suggestion,
    Success,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "suggestion" => Ok(Self::Suggestion),
            "success" => Ok(Self::Success),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Follow-up navigation offered with an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InsightAction {
    ReviewAr,
    ViewExpenses,
    EditTerms,
}

impl InsightAction {
    /// Label shown on the action button
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReviewAr => "Review AR",
            Self::ViewExpenses => "View Expenses",
            Self::EditTerms => "Edit Terms",
        }
    }

    /// Page the action navigates to
    pub fn route(&self) -> &'static str {
        match self {
            Self::ReviewAr => "/invoices",
            Self::ViewExpenses => "/expenses",
            Self::EditTerms => "/invoices",
        }
    }

    pub fn all() -> &'static [InsightAction] {
        &[Self::ReviewAr, Self::ViewExpenses, Self::EditTerms]
    }
}

impl fmt::Display for InsightAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for InsightAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.label() == s)
            .ok_or_else(|| format!("Unknown insight action: {}", s))
    }
}

impl TryFrom<String> for InsightAction {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<InsightAction> for String {
    fn from(action: InsightAction) -> Self {
        action.label().to_string()
    }
}

/// An advisory message for the dashboard. Recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<InsightAction>,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: InsightAction) -> Self {
        self.action = Some(action);
        self
    }
}

// ========== Reports ==========

/// One month of the financial health chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealthPoint {
    /// Short month name ("Jan")
    pub month: String,
    /// Year-month key ("2024-01")
    pub period: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    /// Synthetic forecast rather than observed data
    pub is_projected: bool,
}

/// Headline dashboard totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Sum of paid invoice totals (collected)
    pub total_revenue: f64,
    pub total_expenses: f64,
    /// Sum of invoice totals neither paid nor cancelled
    pub accounts_receivable: f64,
    /// total_revenue - total_expenses
    pub profit: f64,
    /// Collected share of collected + receivable, in percent
    pub invoice_yield: f64,
    pub invoice_count: usize,
    pub expense_count: usize,
}

/// Result of applying one payment to an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub payment: Payment,
    pub total_paid: f64,
    pub balance_due: f64,
    pub previous_status: InvoiceStatus,
    pub status: InvoiceStatus,
    pub status_changed: bool,
}
