//! Financial health chart
//!
//! Buckets invoices and expenses by calendar month over a trailing window
//! and appends one projected month. Revenue here is billed revenue: every
//! invoice except cancelled ones counts in the month it was issued,
//! whether or not it has been paid.
//!
//! The projection is a fixed growth heuristic (average of the last few
//! months, scaled up), not a forecasting model.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::models::{Expense, FinancialHealthPoint, Invoice};
use crate::validate::{validate_expenses, validate_invoices};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, independent of day and time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Shift by a number of months (negative goes back in time)
    pub fn offset(self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Short month name ("Jan")
    pub fn label(&self) -> &'static str {
        MONTH_ABBR[(self.month - 1) as usize]
    }

    /// Year-month key ("2024-01")
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    revenue: f64,
    expenses: f64,
}

/// Months of the trailing window ending with `today`'s month, oldest first
pub fn trailing_months(today: NaiveDate, window_months: u32) -> Result<Vec<MonthKey>> {
    let span = i32::try_from(window_months).map_err(|_| {
        Error::InvalidData(format!("window of {} months is out of range", window_months))
    })?;
    let current = MonthKey::of(today);
    Ok((0..span).rev().map(|back| current.offset(-back)).collect())
}

/// Compute the health chart with the default six-month window
pub fn compute_financial_health(
    invoices: &[Invoice],
    expenses: &[Expense],
    today: NaiveDate,
) -> Result<Vec<FinancialHealthPoint>> {
    compute_financial_health_with(invoices, expenses, today, &AnalyticsConfig::default())
}

/// Compute the health chart: `window_months` observed points plus one projection
pub fn compute_financial_health_with(
    invoices: &[Invoice],
    expenses: &[Expense],
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> Result<Vec<FinancialHealthPoint>> {
    config.validate()?;
    validate_invoices(invoices)?;
    validate_expenses(expenses)?;

    let months = trailing_months(today, config.window_months)?;
    let index: HashMap<MonthKey, usize> =
        months.iter().enumerate().map(|(i, m)| (*m, i)).collect();
    let mut buckets = vec![Bucket::default(); months.len()];

    let mut counted_invoices = 0usize;
    for invoice in invoices.iter().filter(|i| !i.status.is_cancelled()) {
        if let Some(&i) = index.get(&MonthKey::of(invoice.issue_date)) {
            buckets[i].revenue += invoice.total_amount;
            counted_invoices += 1;
        }
    }

    let mut counted_expenses = 0usize;
    for expense in expenses {
        if let Some(&i) = index.get(&MonthKey::of(expense.date)) {
            buckets[i].expenses += expense.amount;
            counted_expenses += 1;
        }
    }

    let mut points: Vec<FinancialHealthPoint> = months
        .iter()
        .zip(&buckets)
        .map(|(month, bucket)| FinancialHealthPoint {
            month: month.label().to_string(),
            period: month.period(),
            revenue: bucket.revenue,
            expenses: bucket.expenses,
            profit: bucket.revenue - bucket.expenses,
            is_projected: false,
        })
        .collect();

    let projected = project_next_month(&points, MonthKey::of(today).offset(1), config)?;
    points.push(projected);

    tracing::debug!(
        window = config.window_months,
        invoices = counted_invoices,
        expenses = counted_expenses,
        "Financial health computed"
    );

    Ok(points)
}

/// Average the most recent real months and scale by the growth factors
fn project_next_month(
    real: &[FinancialHealthPoint],
    month: MonthKey,
    config: &AnalyticsConfig,
) -> Result<FinancialHealthPoint> {
    let lookback = (config.forecast_lookback.max(1) as usize).min(real.len());
    if lookback == 0 {
        return Err(Error::InvalidData(
            "cannot project from an empty window".into(),
        ));
    }

    let recent = &real[real.len() - lookback..];
    let avg_revenue = recent.iter().map(|p| p.revenue).sum::<f64>() / lookback as f64;
    let avg_expenses = recent.iter().map(|p| p.expenses).sum::<f64>() / lookback as f64;

    let revenue = avg_revenue * config.revenue_growth;
    let expenses = avg_expenses * config.expense_growth;

    Ok(FinancialHealthPoint {
        month: month.label().to_string(),
        period: month.period(),
        revenue,
        expenses,
        profit: revenue - expenses,
        is_projected: true,
    })
}
