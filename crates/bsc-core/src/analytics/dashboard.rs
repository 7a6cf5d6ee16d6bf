//! Dashboard bundle: summary, insights and health chart for one business

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::models::{Business, DashboardSummary, FinancialHealthPoint, Insight};
use crate::snapshot::Snapshot;

use super::engine::generate_insights_with;
use super::health::compute_financial_health_with;
use super::summary::summarize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub business: Business,
    /// Reference date the dashboard was computed for
    pub as_of: NaiveDate,
    pub summary: DashboardSummary,
    pub insights: Vec<Insight>,
    pub financial_health: Vec<FinancialHealthPoint>,
}

impl Dashboard {
    pub fn build(snapshot: &Snapshot, today: NaiveDate, config: &AnalyticsConfig) -> Result<Self> {
        let summary = summarize(&snapshot.invoices, &snapshot.expenses)?;
        let insights = generate_insights_with(
            &snapshot.invoices,
            &snapshot.expenses,
            &snapshot.business.currency,
            today,
            config,
        )?;
        let financial_health =
            compute_financial_health_with(&snapshot.invoices, &snapshot.expenses, today, config)?;

        tracing::debug!(
            business = %snapshot.business.id,
            insights = insights.len(),
            "Dashboard built"
        );

        Ok(Self {
            business: snapshot.business.clone(),
            as_of: today,
            summary,
            insights,
            financial_health,
        })
    }
}
