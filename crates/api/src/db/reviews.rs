//! Product review store.

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use driftwood_core::Review;

use super::{StoreError, new_document_id};

/// Read and write access to product reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Up to `size` reviews drawn uniformly at random. Fewer come back when
    /// the collection is smaller than `size`; none when it is empty.
    async fn sample(&self, size: u32) -> Result<Vec<Review>, StoreError>;

    /// Insert a review, assigning an ID if the caller did not supply one.
    /// Returns the stored ID.
    async fn insert(&self, review: Review) -> Result<String, StoreError>;
}

/// `MongoDB`-backed [`ReviewStore`].
#[derive(Debug, Clone)]
pub struct MongoReviewStore {
    collection: Collection<Document>,
}

impl MongoReviewStore {
    /// Bind the store to a collection in `database`.
    #[must_use]
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl ReviewStore for MongoReviewStore {
    async fn sample(&self, size: u32) -> Result<Vec<Review>, StoreError> {
        let pipeline = vec![doc! { "$sample": { "size": size } }];
        let mut cursor = self.collection.aggregate(pipeline).await?;
        let mut reviews = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            reviews.push(bson::from_document(document)?);
        }
        Ok(reviews)
    }

    async fn insert(&self, review: Review) -> Result<String, StoreError> {
        let mut document = bson::to_document(&review)?;
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
}
