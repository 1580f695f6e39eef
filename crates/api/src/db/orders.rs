//! Seller order store.

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use driftwood_core::{Order, SellerId};

use super::{StoreError, new_document_id};

/// Read and write access to checkout orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Orders belonging to `seller`, in store order.
    async fn for_seller(&self, seller: &SellerId) -> Result<Vec<Order>, StoreError>;

    /// Insert a batch of order documents.
    ///
    /// Any `_id` present on an element is discarded and replaced with a
    /// store-assigned one. Returns the documents as stored.
    async fn insert_many(&self, orders: Vec<Document>) -> Result<Vec<Document>, StoreError>;

    /// Delete the order with ID `id`. Returns the number of documents removed.
    async fn delete(&self, id: &str) -> Result<u64, StoreError>;
}

/// `MongoDB`-backed [`OrderStore`].
#[derive(Debug, Clone)]
pub struct MongoOrderStore {
    collection: Collection<Document>,
}

impl MongoOrderStore {
    /// Bind the store to a collection in `database`.
    #[must_use]
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn for_seller(&self, seller: &SellerId) -> Result<Vec<Order>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! { "sellerID": seller.as_str() })
            .await?;
        let mut orders = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            orders.push(bson::from_document(document)?);
        }
        Ok(orders)
    }

    async fn insert_many(&self, orders: Vec<Document>) -> Result<Vec<Document>, StoreError> {
        let mut stored = Vec::with_capacity(orders.len());
        for mut document in orders {
            document.remove("_id");
            document.insert("_id", new_document_id());
            stored.push(document);
        }
        self.collection.insert_many(&stored).await?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
