//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                       - Service banner
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (queries the store)
//!
//! # Products
//! GET    /products               - All products, shuffled per request
//! GET    /products/search?q=     - Case-insensitive name substring search
//! GET    /products/page?page=    - Random 10-per-page window
//! GET    /products/seller/{uid}  - Products listed by one seller
//! POST   /products/add           - Create a product
//! PUT    /products/update/{id}   - Merge fields into a product
//! DELETE /products/delete/{id}   - Delete a product
//!
//! # Orders (bearer token required for listing)
//! GET    /orders                 - Orders of the verified seller
//! POST   /orders/add             - Bulk-create orders
//! DELETE /orders/{orderId}       - Delete an order
//!
//! # Reviews
//! GET    /product-reviews        - Random sample of 10-20 reviews
//! POST   /product-reviews/add    - Create a review
//!
//! # Payments
//! POST   /create-payment-intent  - Create a Stripe payment intent
//! ```

pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Routes mounted under `/products`.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/page", get(products::page))
        .route("/seller/{uid}", get(products::by_seller))
        .route("/add", post(products::create))
        .route("/update/{id}", put(products::update))
        .route("/delete/{id}", delete(products::remove))
}

/// Routes mounted under `/orders`.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/add", post(orders::create_many))
        .route("/{orderId}", delete(orders::remove))
}

/// Routes mounted under `/product-reviews`.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::index))
        .route("/add", post(reviews::create))
}

/// The full route table for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Service banner
        .route("/", get(index))
        // Health checks
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Product routes
        .nest("/products", product_routes())
        // Order routes
        .nest("/orders", order_routes())
        // Review routes
        .nest("/product-reviews", review_routes())
        // Payments
        .route("/create-payment-intent", post(payments::create_intent))
}

/// Service banner for the root path.
async fn index() -> &'static str {
    "Driftwood Market API"
}

/// Liveness probe.
///
/// Answers "ok" whenever the process is up; no dependencies are consulted.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe.
///
/// Runs a cheap query against the document store before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.products().count().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
