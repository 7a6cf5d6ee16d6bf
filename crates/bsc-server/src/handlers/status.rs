//! Status handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub snapshot_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
}

/// GET /api/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        snapshot_loaded: state.snapshot.is_some(),
        business: state.snapshot.as_ref().map(|s| s.business.name.clone()),
    })
}
