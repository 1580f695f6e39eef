//! Document store access for the marketplace collections.
//!
//! # Collections
//!
//! - `products` - Seller product listings (schemaless)
//! - `orders` - Checkout-submitted orders, filtered per seller
//! - `reviews` - Free-form product reviews, served as random samples
//!
//! Each collection is reached through a store trait ([`ProductStore`],
//! [`OrderStore`], [`ReviewStore`]) so handlers never talk to `MongoDB`
//! directly; the `integration-tests` crate swaps in in-memory
//! implementations behind the same traits.
//!
//! Document IDs are assigned by this module (UUIDv4 strings), never by the
//! driver and never by callers of the bulk endpoints.

use std::time::Duration;

use bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use secrecy::ExposeSecret;
use thiserror::Error;
use uuid::Uuid;

use crate::config::DatabaseConfig;

pub mod orders;
pub mod products;
pub mod reviews;

pub use orders::{MongoOrderStore, OrderStore};
pub use products::{MongoProductStore, ProductStore};
pub use reviews::{MongoReviewStore, ReviewStore};

/// Errors produced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver reported a failure (connectivity, write error, bad query).
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A document could not be converted to or from BSON.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

/// Counts reported by an update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matched by the filter (0 or 1 for ID updates).
    pub matched: u64,
    /// Documents actually changed. Can be 0 when the update was a no-op.
    pub modified: u64,
}

/// Connect to `MongoDB` and verify the connection with a ping.
///
/// The driver connects lazily, so without the ping a bad URI would only
/// surface on the first request instead of at startup.
///
/// # Errors
///
/// Returns `StoreError` if the URI does not parse or the ping fails.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, StoreError> {
    let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
    options.app_name = Some("driftwood-api".to_string());
    options.server_selection_timeout = Some(Duration::from_secs(10));

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);
    database.run_command(doc! { "ping": 1 }).await?;

    Ok(database)
}

/// Mint a new document ID.
///
/// Hyphenated UUIDv4, stored in the `_id` field as a plain string so it
/// serializes cleanly in JSON responses.
#[must_use]
pub fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}
