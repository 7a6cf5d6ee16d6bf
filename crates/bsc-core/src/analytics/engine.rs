//! Insight engine - evaluates the registered rules in order

use chrono::NaiveDate;

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::models::{Expense, Insight, Invoice};
use crate::validate::{normalize_currency, validate_expenses, validate_invoices};

use super::rules::{ExpenseConcentrationRule, OutstandingReceivablesRule, PaymentTermsRule};

/// Context provided to insight rules
///
/// Built once per run: records are validated and the currency normalised
/// up front so rules can assume well-formed input.
pub struct AnalysisContext<'a> {
    pub invoices: &'a [Invoice],
    pub expenses: &'a [Expense],
    /// Upper-case currency code used for messages
    pub currency: String,
    /// Reference date for overdue checks
    pub today: NaiveDate,
    pub config: &'a AnalyticsConfig,
    accounts_receivable: f64,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        invoices: &'a [Invoice],
        expenses: &'a [Expense],
        currency: &str,
        today: NaiveDate,
        config: &'a AnalyticsConfig,
    ) -> Result<Self> {
        validate_invoices(invoices)?;
        validate_expenses(expenses)?;
        let currency = normalize_currency(currency)?;

        let accounts_receivable = invoices
            .iter()
            .filter(|i| i.status.is_open())
            .map(|i| i.total_amount)
            .sum();

        Ok(Self {
            invoices,
            expenses,
            currency,
            today,
            config,
            accounts_receivable,
        })
    }

    /// Invoices that are neither paid nor cancelled
    pub fn open_invoices(&self) -> impl Iterator<Item = &'a Invoice> {
        self.invoices.iter().filter(|i| i.status.is_open())
    }

    /// Sum of open invoice totals
    pub fn accounts_receivable(&self) -> f64 {
        self.accounts_receivable
    }
}

/// A single independent insight rule
pub trait InsightRule: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule; most rules produce zero or one insight
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>>;
}

/// Runs rules in registration order and concatenates their output
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();

        // Order is part of the output contract
        engine.register(Box::new(OutstandingReceivablesRule));
        engine.register(Box::new(ExpenseConcentrationRule));
        engine.register(Box::new(PaymentTermsRule));

        engine
    }

    /// Create an engine with no rules
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule; the first failing rule aborts the run
    pub fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let mut insights = vec![];

        for rule in &self.rules {
            let produced = rule.evaluate(ctx)?;
            tracing::debug!(rule = rule.name(), count = produced.len(), "Insight rule evaluated");
            insights.extend(produced);
        }

        Ok(insights)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

/// Generate dashboard insights with the default thresholds
pub fn generate_insights(
    invoices: &[Invoice],
    expenses: &[Expense],
    currency: &str,
    today: NaiveDate,
) -> Result<Vec<Insight>> {
    generate_insights_with(
        invoices,
        expenses,
        currency,
        today,
        &AnalyticsConfig::default(),
    )
}

/// Generate dashboard insights with explicit configuration
pub fn generate_insights_with(
    invoices: &[Invoice],
    expenses: &[Expense],
    currency: &str,
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> Result<Vec<Insight>> {
    let ctx = AnalysisContext::new(invoices, expenses, currency, today, config)?;
    InsightEngine::new().analyze(&ctx)
}
