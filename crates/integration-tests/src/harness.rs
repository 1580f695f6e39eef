//! In-process test harness.
//!
//! Builds the real router over in-memory collaborators and dispatches
//! requests through it with `tower::ServiceExt::oneshot`, so a test sees
//! exactly what an HTTP client would: routing, extractors, status codes,
//! and JSON bodies.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use driftwood_api::routes;
use driftwood_api::state::AppState;

use crate::stores::{
    MemoryOrderStore, MemoryProductStore, MemoryReviewStore, StaticGateway, StaticVerifier,
};
use crate::{TEST_CLIENT_SECRET, TEST_SELLER, TEST_TOKEN};

/// The router plus handles to the stores behind it.
pub struct TestHarness {
    router: Router,
    pub products: Arc<MemoryProductStore>,
    pub orders: Arc<MemoryOrderStore>,
    pub reviews: Arc<MemoryReviewStore>,
}

impl TestHarness {
    /// Harness with empty stores, a verifier that accepts [`TEST_TOKEN`] for
    /// [`TEST_SELLER`], and a gateway answering [`TEST_CLIENT_SECRET`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_services(
            StaticVerifier::new().with_token(TEST_TOKEN, TEST_SELLER),
            StaticGateway::succeeding(TEST_CLIENT_SECRET),
        )
    }

    /// Harness with custom service doubles.
    #[must_use]
    pub fn with_services(identity: StaticVerifier, payments: StaticGateway) -> Self {
        let products = Arc::new(MemoryProductStore::new());
        let orders = Arc::new(MemoryOrderStore::new());
        let reviews = Arc::new(MemoryReviewStore::new());

        let state = AppState::new(
            products.clone(),
            orders.clone(),
            reviews.clone(),
            Arc::new(identity),
            Arc::new(payments),
        );

        Self {
            router: routes::routes().with_state(state),
            products,
            orders,
            reviews,
        }
    }

    /// Send a request through the router, decoding the body as JSON.
    ///
    /// Plain-text bodies come back as `Value::String`, empty ones as
    /// `Value::Null`.
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn get_with_bearer(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn get_with_auth_header(&self, uri: &str, value: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, value)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_json(Method::POST, uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_json(Method::PUT, uri, body).await
    }

    /// POST a raw body with an arbitrary content type.
    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body.to_owned()))
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    async fn send_json(&self, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
        let bytes = serde_json::to_vec(body).expect("Failed to serialize request body");
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bytes))
                .expect("Failed to build request"),
        )
        .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
