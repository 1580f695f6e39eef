//! Product routes.
//!
//! JSON endpoints for the product catalog: randomized listings, name
//! search, paging, and per-seller CRUD.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use bson::Document;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use driftwood_core::{Product, SellerId};

use crate::error::AppError;
use crate::state::AppState;

/// Number of products in one page of `GET /products/page`.
const PAGE_SIZE: u32 = 10;

/// List every product, shuffled.
///
/// GET /products
///
/// The shuffle is a fresh permutation per request: two calls return the
/// same set in different orders.
///
/// # Errors
///
/// Returns `AppError` if the store fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let mut products = state.products().all().await?;
    products.shuffle(&mut rand::rng());
    Ok(Json(products))
}

/// Query parameters for product search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring to look for in product names.
    pub q: Option<String>,
}

/// Search products by name substring, ignoring case.
///
/// GET /products/search?q=
///
/// Only the `name` field is searched; regex metacharacters in the query are
/// taken literally.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when `q` is missing or empty.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query is required".to_string()));
    }

    let products = state.products().search(&query).await?;
    Ok(Json(products))
}

/// Query parameters for the paged listing.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// 1-based page number. Missing or 0 means the first page.
    pub page: Option<u64>,
}

/// One page of a randomized product listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u32,
    pub total_products: u64,
}

/// Return one page of products in random order.
///
/// GET /products/page?page=
///
/// Pages are windows over a fresh random permutation, so the same page
/// number returns different products on consecutive requests. Useful for
/// discovery feeds, useless for stable pagination.
///
/// # Errors
///
/// Returns `AppError::NotFound` when `page` is past the last page.
pub async fn page(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<ProductPage>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page = params.page.unwrap_or(1).max(1);

    let total = state.products().count().await?;
    let total_pages = total.div_ceil(u64::from(PAGE_SIZE));
    if page > total_pages {
        return Err(AppError::NotFound(format!("Page {page} does not exist")));
    }

    let skip = (page - 1) * u64::from(PAGE_SIZE);
    let products = state
        .products()
        .random_window(total, skip, PAGE_SIZE)
        .await?;

    Ok(Json(ProductPage {
        products,
        current_page: page,
        total_pages,
        page_size: PAGE_SIZE,
        total_products: total,
    }))
}

/// List one seller's products.
///
/// GET /products/seller/{uid}
///
/// # Errors
///
/// Returns `AppError` if the store fails.
pub async fn by_seller(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.products().by_seller(&SellerId::from(uid)).await?;
    Ok(Json(products))
}

/// Create a product.
///
/// POST /products/add
///
/// Responds 201 with `{"insertedId": "..."}`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when the body is not a JSON object.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(product) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let id = state.products().insert(product).await?;
    Ok((StatusCode::CREATED, Json(json!({ "insertedId": id }))))
}

/// Merge fields into a product.
///
/// PUT /products/update/{id}
///
/// Body fields overwrite the stored values; fields not named keep their
/// current values. Responds with `{"modifiedCount": n}`; `n` is 0 when the
/// update matched but changed nothing.
///
/// # Errors
///
/// Returns `AppError::NotFound` when no product has that ID.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(changes) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let outcome = state.products().update(&id, changes).await?;
    if outcome.matched == 0 {
        return Err(AppError::NotFound(format!("No product with id {id}")));
    }
    Ok(Json(json!({ "modifiedCount": outcome.modified })))
}

/// Delete a product.
///
/// DELETE /products/delete/{id}
///
/// Responds with `{"deletedCount": 1}`.
///
/// # Errors
///
/// Returns `AppError::NotFound` when no product has that ID.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = state.products().delete(&id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("No product with id {id}")));
    }
    Ok(Json(json!({ "deletedCount": deleted })))
}
