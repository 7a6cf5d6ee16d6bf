//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{reference_date, AppError, AppState};
use bsc_core::models::DEFAULT_CURRENCY;
use bsc_core::{generate_insights_with, Expense, Insight, InsightAction, Invoice};

/// Request body for generating insights
#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Currency for formatted amounts (defaults to USD)
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// One entry of the action table
#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub label: &'static str,
    pub route: &'static str,
}

/// POST /api/insights - Generate insights for the supplied records
pub async fn post_insights(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let Json(req) = payload?;
    let currency = req.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);

    let insights = generate_insights_with(
        &req.invoices,
        &req.expenses,
        currency,
        reference_date(req.today),
        &state.analytics,
    )?;

    Ok(Json(insights))
}

/// GET /api/insights/actions - Where each insight action navigates
pub async fn list_insight_actions() -> Json<Vec<ActionInfo>> {
    let actions = InsightAction::all()
        .iter()
        .map(|a| ActionInfo {
            label: a.label(),
            route: a.route(),
        })
        .collect();
    Json(actions)
}
