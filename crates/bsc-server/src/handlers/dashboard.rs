//! Dashboard handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{reference_date, AppError, AppState};
use bsc_core::{Dashboard, Snapshot};

/// Query parameters for the loaded dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Reference date (defaults to the server's local date)
    pub today: Option<NaiveDate>,
}

/// Request body for an ad-hoc dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub snapshot: Snapshot,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// GET /api/dashboard - Dashboard for the snapshot loaded at startup
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let snapshot = state
        .snapshot
        .as_ref()
        .ok_or_else(|| AppError::not_found("No snapshot loaded"))?;

    let dashboard = Dashboard::build(snapshot, reference_date(params.today), &state.analytics)?;
    Ok(Json(dashboard))
}

/// POST /api/dashboard - Dashboard for a snapshot supplied in the body
pub async fn post_dashboard(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Result<Json<Dashboard>, AppError> {
    let Json(mut req) = payload?;
    // Same checks as a snapshot read from disk
    req.snapshot.normalize()?;

    let dashboard = Dashboard::build(&req.snapshot, reference_date(req.today), &state.analytics)?;
    Ok(Json(dashboard))
}
