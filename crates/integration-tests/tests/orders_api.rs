//! Integration tests for the order endpoints.
//!
//! Listing requires a bearer token that the harness verifier resolves to
//! [`TEST_SELLER`]; creation and deletion are open.

use axum::http::StatusCode;
use bson::doc;
use serde_json::json;

use driftwood_integration_tests::{TEST_SELLER, TEST_TOKEN, TestHarness, order_doc};

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_listing_without_authorization_header_is_unauthorized() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/orders").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["error"]
            .as_str()
            .expect("error body")
            .contains("Missing Authorization header")
    );
}

#[tokio::test]
async fn test_listing_rejects_non_bearer_schemes() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .get_with_auth_header("/orders", "Basic dXNlcjpwYXNz")
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["error"]
            .as_str()
            .expect("error body")
            .contains("Expected a bearer token")
    );
}

#[tokio::test]
async fn test_listing_rejects_unknown_tokens() {
    let harness = TestHarness::new();

    let (status, body) = harness.get_with_bearer("/orders", "not-a-real-token").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_listing_returns_only_the_verified_sellers_orders() {
    let harness = TestHarness::new();
    harness.orders.seed(vec![
        order_doc(TEST_SELLER, 4200),
        order_doc(TEST_SELLER, 1099),
        order_doc("someone-else", 9999),
    ]);

    let (status, body) = harness.get_with_bearer("/orders", TEST_TOKEN).await;

    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().expect("orders array");
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|order| order["sellerID"] == TEST_SELLER));
}

#[tokio::test]
async fn test_listing_with_no_orders_is_an_empty_array() {
    let harness = TestHarness::new();

    let (status, body) = harness.get_with_bearer("/orders", TEST_TOKEN).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"], json!([]));
}

// ============================================================================
// Bulk Creation Tests
// ============================================================================

#[tokio::test]
async fn test_bulk_create_strips_ids_and_stamps_created_at() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json(
            "/orders/add",
            &json!([
                { "_id": "caller-chosen", "sellerID": "seller-1", "totalAmount": 100 },
                { "sellerID": "seller-2", "totalAmount": 250 },
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["insertedCount"], 2);

    let orders = body["orders"].as_array().expect("orders array");
    assert_eq!(orders.len(), 2);
    for order in orders {
        let id = order["_id"].as_str().expect("assigned id");
        assert!(!id.is_empty());
        assert_ne!(id, "caller-chosen");
        assert!(order["createdAt"].is_string());
    }

    // Every order in the batch carries the same timestamp
    let first_created = orders.first().expect("first order")["createdAt"].clone();
    assert!(orders.iter().all(|order| order["createdAt"] == first_created));

    assert_eq!(harness.orders.documents().len(), 2);
}

#[tokio::test]
async fn test_bulk_create_requires_an_array() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json("/orders/add", &json!({ "sellerID": "seller-1" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error body")
            .contains("Expected an array of orders")
    );
    assert!(harness.orders.documents().is_empty());
}

#[tokio::test]
async fn test_bulk_create_with_an_empty_array_is_an_internal_error() {
    let harness = TestHarness::new();

    let (status, body) = harness.post_json("/orders/add", &json!([])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(harness.orders.documents().is_empty());
}

#[tokio::test]
async fn test_bulk_create_with_non_object_elements_is_an_internal_error() {
    let harness = TestHarness::new();

    let (status, body) = harness.post_json("/orders/add", &json!([42, "order"])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[tokio::test]
async fn test_delete_blank_order_id_is_bad_request() {
    let harness = TestHarness::new();

    let (status, body) = harness.delete("/orders/%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error body")
            .contains("Order id is required")
    );
}

#[tokio::test]
async fn test_delete_missing_order_is_not_found() {
    let harness = TestHarness::new();

    let (status, _) = harness.delete("/orders/no-such-order").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_the_order() {
    let harness = TestHarness::new();
    harness.orders.seed(vec![doc! {
        "_id": "order-1",
        "sellerID": "seller-1",
        "totalAmount": 100,
    }]);

    let (status, body) = harness.delete("/orders/order-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
    assert!(harness.orders.documents().is_empty());
}
