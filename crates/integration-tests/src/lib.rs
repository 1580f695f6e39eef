//! Integration tests for the Driftwood Market API.
//!
//! The `stores` module provides in-memory implementations of the store and
//! service traits, and `harness` wires them into the real router so requests
//! run in-process without MongoDB, the identity provider, or Stripe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftwood-integration-tests
//!
//! # Against a running server (see tests/live_api.rs)
//! API_BASE_URL=http://localhost:5000 cargo test -p driftwood-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `products_api` - Listing, search, pagination, CRUD
//! - `orders_api` - Bearer-token listing, bulk creation, deletion
//! - `reviews_api` - Random sampling, creation
//! - `payments_api` - Payment intent creation
//! - `health_api` - Banner and health endpoints
//! - `live_api` - `#[ignore]`d tests against a deployed instance

#![cfg_attr(not(test), forbid(unsafe_code))]
// Harness helpers panic on setup failures instead of propagating them
#![allow(clippy::missing_panics_doc)]

use bson::{Document, doc};

use driftwood_api::db::new_document_id;

pub mod harness;
pub mod stores;

pub use harness::TestHarness;
pub use stores::{
    MemoryOrderStore, MemoryProductStore, MemoryReviewStore, StaticGateway, StaticVerifier,
};

/// Token the default harness verifier accepts.
pub const TEST_TOKEN: &str = "test-token-seller-42";

/// Seller the default token resolves to.
pub const TEST_SELLER: &str = "seller-42";

/// Client secret the default harness gateway answers with.
pub const TEST_CLIENT_SECRET: &str = "pi_3Nq0test_secret_driftwood";

/// Build a product document for seeding stores directly.
#[must_use]
pub fn product_doc(name: &str, seller: &str) -> Document {
    doc! {
        "_id": new_document_id(),
        "name": name,
        "sellerID": seller,
        "price": 1999,
        "stock": 12,
    }
}

/// Build an order document for seeding stores directly.
#[must_use]
pub fn order_doc(seller: &str, total: i64) -> Document {
    doc! {
        "_id": new_document_id(),
        "customerId": "customer-7",
        "sellerID": seller,
        "totalAmount": total,
        "products": [{ "name": "Driftwood Mirror", "quantity": 1 }],
        "createdAt": "2026-08-01T09:30:00.000Z",
    }
}

/// Build a review document for seeding stores directly.
#[must_use]
pub fn review_doc(author: &str, rating: i32, text: &str) -> Document {
    doc! {
        "_id": new_document_id(),
        "author": author,
        "rating": rating,
        "text": text,
    }
}
