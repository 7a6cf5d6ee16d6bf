//! Payment handlers

use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;

use crate::AppError;
use bsc_core::{settle_payment, Invoice, Payment, Settlement};

/// Request body for settling a payment
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub invoice: Invoice,
    /// Payments already recorded against the invoice
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub payment: Payment,
}

/// POST /api/payments/settle - Decide the outcome of a payment
///
/// Stateless: the caller persists the returned payment and status together.
pub async fn post_settle_payment(
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> Result<Json<Settlement>, AppError> {
    let Json(req) = payload?;
    let settlement = settle_payment(&req.invoice, &req.payments, req.payment)?;
    Ok(Json(settlement))
}
