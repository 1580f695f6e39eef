//! Product review routes.
//!
//! The storefront shows a rotating selection of reviews rather than the
//! whole collection, so listing draws a random sample of 10 to 20.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use rand::Rng;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;
use driftwood_core::Review;

const MIN_SAMPLE: u32 = 10;
const MAX_SAMPLE: u32 = 20;

/// Sample product reviews.
///
/// GET /product-reviews
///
/// Draws between 10 and 20 reviews at random; a smaller collection yields
/// everything it has.
///
/// # Errors
///
/// Returns `AppError::NotFound` when the collection is empty.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let size = rand::rng().random_range(MIN_SAMPLE..=MAX_SAMPLE);
    let reviews = state.reviews().sample(size).await?;
    if reviews.is_empty() {
        return Err(AppError::NotFound("No reviews found".to_string()));
    }
    Ok(Json(reviews))
}

#[derive(Debug, Deserialize)]
pub struct AddReviewRequest {
    review: Review,
}

/// Add a product review.
///
/// POST /product-reviews/add
///
/// The body wraps the review under a `review` key. Responds 201 with
/// `{"insertedId": id}`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when the body does not deserialize.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let id = state.reviews().insert(request.review).await?;
    Ok((StatusCode::CREATED, Json(json!({ "insertedId": id }))))
}
