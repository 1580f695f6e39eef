//! Integration tests for payment intent creation.

use axum::http::StatusCode;
use serde_json::json;

use driftwood_integration_tests::{StaticGateway, StaticVerifier, TEST_CLIENT_SECRET, TestHarness};

#[tokio::test]
async fn test_create_intent_returns_the_client_secret() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json("/create-payment-intent", &json!({ "amount": 1099 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientSecret"], TEST_CLIENT_SECRET);
}

#[tokio::test]
async fn test_gateway_failures_surface_as_internal_errors() {
    let harness = TestHarness::with_services(StaticVerifier::new(), StaticGateway::failing());

    let (status, body) = harness
        .post_json("/create-payment-intent", &json!({ "amount": 1099 }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_create_intent_rejects_fractional_amounts() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json("/create-payment-intent", &json!({ "amount": 10.5 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_intent_requires_an_amount() {
    let harness = TestHarness::new();

    let (status, _) = harness.post_json("/create-payment-intent", &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
