//! Product catalog store.

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Cursor, Database};

use driftwood_core::{Product, SellerId};

use super::{StoreError, UpdateOutcome, new_document_id};

/// Read and write access to the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product in the catalog, in store order.
    async fn all(&self) -> Result<Vec<Product>, StoreError>;

    /// Products whose name contains `query`, ignoring case.
    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError>;

    /// Total number of products in the catalog.
    async fn count(&self) -> Result<u64, StoreError>;

    /// A window of `limit` products starting at `skip`, taken from a fresh
    /// random permutation of `sample_size` documents.
    async fn random_window(
        &self,
        sample_size: u64,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Product>, StoreError>;

    /// Products listed by `seller`.
    async fn by_seller(&self, seller: &SellerId) -> Result<Vec<Product>, StoreError>;

    /// Insert a product, assigning an ID if the caller did not supply one.
    /// Returns the stored ID.
    async fn insert(&self, product: Product) -> Result<String, StoreError>;

    /// Merge `changes` field-by-field into the product with ID `id`.
    /// Fields not named in `changes` keep their current values.
    async fn update(&self, id: &str, changes: Document) -> Result<UpdateOutcome, StoreError>;

    /// Delete the product with ID `id`. Returns the number of documents removed.
    async fn delete(&self, id: &str) -> Result<u64, StoreError>;
}

/// `MongoDB`-backed [`ProductStore`].
#[derive(Debug, Clone)]
pub struct MongoProductStore {
    collection: Collection<Document>,
}

impl MongoProductStore {
    /// Bind the store to a collection in `database`.
    #[must_use]
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        collect_products(cursor).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        let filter = doc! {
            "name": { "$regex": regex::escape(query), "$options": "i" }
        };
        let cursor = self.collection.find(filter).await?;
        collect_products(cursor).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn random_window(
        &self,
        sample_size: u64,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Product>, StoreError> {
        // $sample shuffles server-side; $skip/$limit carve the page out of
        // the shuffled stream.
        let pipeline = vec![
            doc! { "$sample": { "size": i64::try_from(sample_size).unwrap_or(i64::MAX) } },
            doc! { "$skip": i64::try_from(skip).unwrap_or(i64::MAX) },
            doc! { "$limit": limit },
        ];
        let cursor = self.collection.aggregate(pipeline).await?;
        collect_products(cursor).await
    }

    async fn by_seller(&self, seller: &SellerId) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(doc! { "sellerID": seller.as_str() }).await?;
        collect_products(cursor).await
    }

    async fn insert(&self, product: Product) -> Result<String, StoreError> {
        let mut document = bson::to_document(&product)?;
        let id = match document.get_str("_id") {
            Ok(id) => id.to_owned(),
            Err(_) => {
                let id = new_document_id();
                document.insert("_id", id.clone());
                id
            }
        };
        self.collection.insert_one(document).await?;
        Ok(id)
    }

    async fn update(&self, id: &str, changes: Document) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": changes })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}

/// Drain a cursor of raw documents into typed products.
async fn collect_products(mut cursor: Cursor<Document>) -> Result<Vec<Product>, StoreError> {
    let mut products = Vec::new();
    while let Some(document) = cursor.try_next().await? {
        products.push(bson::from_document(document)?);
    }
    Ok(products)
}
