//! Payment routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;
use driftwood_core::Amount;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    amount: Amount,
}

/// Create a payment intent.
///
/// POST /create-payment-intent
///
/// Takes `{"amount": <minor units>}` and responds with
/// `{"clientSecret": ...}` for the frontend to confirm the payment.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when the body does not deserialize and
/// `AppError::Payment` when the gateway call fails.
pub async fn create_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let client_secret = state.payments().create_intent(request.amount).await?;
    Ok(Json(json!({ "clientSecret": client_secret })))
}
