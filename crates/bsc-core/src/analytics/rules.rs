//! Built-in insight rules
//!
//! Each rule is independent; the engine concatenates their output in a
//! fixed order (receivables, expense concentration, payment terms).

use std::collections::HashMap;

use crate::currency::format_money;
use crate::error::Result;
use crate::models::{Expense, Insight, InsightAction, InsightKind};

use super::engine::{AnalysisContext, InsightRule};

/// Warns about money still owed by customers
pub struct OutstandingReceivablesRule;

impl InsightRule for OutstandingReceivablesRule {
    fn name(&self) -> &'static str {
        "Outstanding Receivables"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let ar = ctx.accounts_receivable();
        if ar <= 0.0 {
            return Ok(vec![]);
        }

        let message = format!(
            "You have {} in outstanding invoices.",
            format_money(ar, &ctx.currency)?
        );
        Ok(vec![
            Insight::new(InsightKind::Warning, message).with_action(InsightAction::ReviewAr)
        ])
    }
}

/// Category totals in first-seen order
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match index.get(expense.category.as_str()) {
            Some(&i) => totals[i].1 += expense.amount,
            None => {
                index.insert(expense.category.as_str(), totals.len());
                totals.push((expense.category.clone(), expense.amount));
            }
        }
    }

    totals
}

/// Category with the strictly highest total; ties go to the first seen
pub fn top_category(expenses: &[Expense]) -> Option<(String, f64)> {
    let mut best: Option<(String, f64)> = None;
    for (category, total) in category_totals(expenses) {
        let beats = best.as_ref().map_or(true, |(_, best_total)| total > *best_total);
        if beats {
            best = Some((category, total));
        }
    }
    best
}

/// Suggests a closer look when one category dominates spending
pub struct ExpenseConcentrationRule;

impl InsightRule for ExpenseConcentrationRule {
    fn name(&self) -> &'static str {
        "Expense Concentration"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let total: f64 = ctx.expenses.iter().map(|e| e.amount).sum();
        if total <= 0.0 {
            return Ok(vec![]);
        }

        let Some((category, amount)) = top_category(ctx.expenses) else {
            return Ok(vec![]);
        };

        // Compared after rounding to a whole percent
        let percent = (amount / total * 100.0).round() as u32;
        if percent <= ctx.config.concentration_threshold_pct {
            return Ok(vec![]);
        }

        let message = format!(
            "Your highest expense is {} ({}% of total). Consider looking for cost-saving opportunities here.",
            category, percent
        );
        Ok(vec![Insight::new(InsightKind::Suggestion, message)
            .with_action(InsightAction::ViewExpenses)])
    }
}

/// Flags overdue invoices, or congratulates when nothing is owed
pub struct PaymentTermsRule;

impl InsightRule for PaymentTermsRule {
    fn name(&self) -> &'static str {
        "Payment Terms"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let any_overdue = ctx.open_invoices().any(|i| i.due_date < ctx.today);

        if any_overdue {
            return Ok(vec![Insight::new(
                InsightKind::Warning,
                "You have overdue invoices. Consider shortening your payment terms for new projects.",
            )
            .with_action(InsightAction::EditTerms)]);
        }

        if ctx.accounts_receivable() == 0.0 && !ctx.invoices.is_empty() {
            return Ok(vec![Insight::new(
                InsightKind::Success,
                "Great job! All invoices are paid. Your cash flow looks healthy.",
            )]);
        }

        Ok(vec![])
    }
}
