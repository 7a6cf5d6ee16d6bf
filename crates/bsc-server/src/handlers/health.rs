//! Financial health handler

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{reference_date, AppError, AppState};
use bsc_core::{compute_financial_health_with, Expense, FinancialHealthPoint, Invoice};

#[derive(Debug, Deserialize)]
pub struct FinancialHealthRequest {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// POST /api/financial-health - Trailing window plus one projected month
pub async fn post_financial_health(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FinancialHealthRequest>, JsonRejection>,
) -> Result<Json<Vec<FinancialHealthPoint>>, AppError> {
    let Json(req) = payload?;
    let points = compute_financial_health_with(
        &req.invoices,
        &req.expenses,
        reference_date(req.today),
        &state.analytics,
    )?;

    Ok(Json(points))
}
