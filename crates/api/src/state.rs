//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{OrderStore, ProductStore, ReviewStore};
use crate::services::{IdentityVerifier, PaymentGateway};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and hands out the store and
/// service trait objects. Handlers never see concrete implementations,
/// which is what lets the integration tests run the real router against
/// in-memory stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    reviews: Arc<dyn ReviewStore>,
    identity: Arc<dyn IdentityVerifier>,
    payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Create a new application state from its collaborators.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        reviews: Arc<dyn ReviewStore>,
        identity: Arc<dyn IdentityVerifier>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                products,
                orders,
                reviews,
                identity,
                payments,
            }),
        }
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderStore {
        self.inner.orders.as_ref()
    }

    /// Get a reference to the review store.
    #[must_use]
    pub fn reviews(&self) -> &dyn ReviewStore {
        self.inner.reviews.as_ref()
    }

    /// Get a reference to the identity verifier.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityVerifier {
        self.inner.identity.as_ref()
    }

    /// Get a reference to the payment gateway.
    #[must_use]
    pub fn payments(&self) -> &dyn PaymentGateway {
        self.inner.payments.as_ref()
    }
}
