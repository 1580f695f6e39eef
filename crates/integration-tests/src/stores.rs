//! In-memory doubles for the store and service traits.
//!
//! Each store mirrors the observable behavior of its MongoDB counterpart
//! over a `Vec<Document>`: same ID assignment, same filter semantics, same
//! update counts. The service doubles answer from fixed tables instead of
//! calling the identity provider or Stripe.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bson::Document;
use rand::seq::SliceRandom;

use driftwood_api::db::{
    OrderStore, ProductStore, ReviewStore, StoreError, UpdateOutcome, new_document_id,
};
use driftwood_api::services::{IdentityError, IdentityVerifier, PaymentError, PaymentGateway};
use driftwood_core::{Amount, Order, Product, Review, SellerId};

/// In-memory [`ProductStore`].
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    documents: Mutex<Vec<Document>>,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents.
    pub fn seed(&self, documents: Vec<Document>) {
        *self.documents.lock().expect("lock poisoned") = documents;
    }

    /// Snapshot of the raw stored documents.
    #[must_use]
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        let documents = self.documents.lock().expect("lock poisoned").clone();
        into_products(documents)
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        let products = self.all().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.name_contains(query))
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.documents.lock().expect("lock poisoned").len() as u64)
    }

    async fn random_window(
        &self,
        sample_size: u64,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Product>, StoreError> {
        let mut documents = self.documents.lock().expect("lock poisoned").clone();
        documents.shuffle(&mut rand::rng());
        documents.truncate(usize::try_from(sample_size).unwrap_or(usize::MAX));

        let window = documents
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        into_products(window)
    }

    async fn by_seller(&self, seller: &SellerId) -> Result<Vec<Product>, StoreError> {
        let documents = self.documents.lock().expect("lock poisoned").clone();
        let matching = documents
            .into_iter()
            .filter(|document| document.get_str("sellerID") == Ok(seller.as_str()))
            .collect();
        into_products(matching)
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
        self.documents.lock().expect("lock poisoned").push(document);
        Ok(id)
    }

    async fn update(&self, id: &str, changes: Document) -> Result<UpdateOutcome, StoreError> {
        // The server rejects an empty $set before matching; mirror that
        if changes.is_empty() {
            return Err(StoreError::InvalidDocument("'$set' is empty".to_string()));
        }

        let mut documents = self.documents.lock().expect("lock poisoned");
        let Some(document) = documents
            .iter_mut()
            .find(|document| document.get_str("_id") == Ok(id))
        else {
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            });
        };

        let mut changed = false;
        for (field, value) in changes {
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                changed = true;
            }
        }
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        Ok(remove_by_id(
            &mut self.documents.lock().expect("lock poisoned"),
            id,
        ))
    }
}

/// In-memory [`OrderStore`].
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    documents: Mutex<Vec<Document>>,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents.
    pub fn seed(&self, documents: Vec<Document>) {
        *self.documents.lock().expect("lock poisoned") = documents;
    }

    /// Snapshot of the raw stored documents.
    #[must_use]
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn for_seller(&self, seller: &SellerId) -> Result<Vec<Order>, StoreError> {
        let documents = self.documents.lock().expect("lock poisoned").clone();
        let mut orders = Vec::new();
        for document in documents {
            if document.get_str("sellerID") == Ok(seller.as_str()) {
                orders.push(bson::from_document(document)?);
            }
        }
        Ok(orders)
    }

    async fn insert_many(&self, orders: Vec<Document>) -> Result<Vec<Document>, StoreError> {
        // The driver refuses empty batches; mirror that
        if orders.is_empty() {
            return Err(StoreError::InvalidDocument(
                "no documents provided".to_string(),
            ));
        }

        let mut stored = Vec::with_capacity(orders.len());
        for mut document in orders {
            document.remove("_id");
            document.insert("_id", new_document_id());
            stored.push(document);
        }
        self.documents
            .lock()
            .expect("lock poisoned")
            .extend(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        Ok(remove_by_id(
            &mut self.documents.lock().expect("lock poisoned"),
            id,
        ))
    }
}

/// In-memory [`ReviewStore`].
#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    documents: Mutex<Vec<Document>>,
}

impl MemoryReviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents.
    pub fn seed(&self, documents: Vec<Document>) {
        *self.documents.lock().expect("lock poisoned") = documents;
    }

    /// Snapshot of the raw stored documents.
    #[must_use]
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn sample(&self, size: u32) -> Result<Vec<Review>, StoreError> {
        let mut documents = self.documents.lock().expect("lock poisoned").clone();
        documents.shuffle(&mut rand::rng());
        documents.truncate(usize::try_from(size).unwrap_or(usize::MAX));

        let mut reviews = Vec::new();
        for document in documents {
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
        self.documents.lock().expect("lock poisoned").push(document);
        Ok(id)
    }
}

/// Identity verifier backed by a fixed token table.
#[derive(Debug, Default)]
pub struct StaticVerifier {
    sellers: HashMap<String, SellerId>,
}

impl StaticVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as belonging to `seller`.
    #[must_use]
    pub fn with_token(mut self, token: &str, seller: &str) -> Self {
        self.sellers.insert(token.to_owned(), SellerId::from(seller));
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<SellerId, IdentityError> {
        self.sellers
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityError::Rejected("INVALID_ID_TOKEN".to_string()))
    }
}

/// Payment gateway answering with a canned client secret, or failing.
#[derive(Debug)]
pub struct StaticGateway {
    client_secret: Option<String>,
}

impl StaticGateway {
    /// Gateway that answers every intent with `client_secret`.
    #[must_use]
    pub fn succeeding(client_secret: &str) -> Self {
        Self {
            client_secret: Some(client_secret.to_owned()),
        }
    }

    /// Gateway that fails every intent.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            client_secret: None,
        }
    }
}

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn create_intent(&self, _amount: Amount) -> Result<String, PaymentError> {
        self.client_secret.clone().ok_or(PaymentError::Api {
            status: 502,
            message: "gateway offline".to_string(),
        })
    }
}

/// Remove the first document whose `_id` is `id`. Returns the removed count.
fn remove_by_id(documents: &mut Vec<Document>, id: &str) -> u64 {
    match documents
        .iter()
        .position(|document| document.get_str("_id") == Ok(id))
    {
        Some(index) => {
            documents.remove(index);
            1
        }
        None => 0,
    }
}

/// Convert raw documents into typed products.
fn into_products(documents: Vec<Document>) -> Result<Vec<Product>, StoreError> {
    let mut products = Vec::new();
    for document in documents {
        products.push(bson::from_document(document)?);
    }
    Ok(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bson::doc;

    use super::*;

    #[tokio::test]
    async fn test_update_merges_and_counts() {
        let store = MemoryProductStore::new();
        store.seed(vec![
            doc! { "_id": "prod-1", "name": "Red Shoe", "price": 10_i64, "color": "red" },
        ]);

        let outcome = store
            .update("prod-1", doc! { "price": 5_i64 })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let stored = store.documents().into_iter().next().unwrap();
        assert_eq!(stored.get_i64("price").unwrap(), 5);
        assert_eq!(stored.get_str("color").unwrap(), "red");

        // Same value again matches but modifies nothing
        let outcome = store
            .update("prod-1", doc! { "price": 5_i64 })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });
    }

    #[tokio::test]
    async fn test_sample_caps_at_collection_size() {
        let store = MemoryReviewStore::new();
        store.seed(vec![
            doc! { "_id": "r1", "rating": 5 },
            doc! { "_id": "r2", "rating": 3 },
        ]);

        let reviews = store.sample(15).await.unwrap();
        assert_eq!(reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_verifier_rejects_unknown_tokens() {
        let verifier = StaticVerifier::new().with_token("good", "seller-1");

        let seller = verifier.verify("good").await.unwrap();
        assert_eq!(seller.as_str(), "seller-1");

        let err = verifier.verify("bad").await.unwrap_err();
        assert!(matches!(err, IdentityError::Rejected(_)));
    }
}
