//! Product catalog document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::id::SellerId;

/// A product listing.
///
/// Products are schemaless documents. The API reads only the identifier, the
/// display name, and the owning seller; everything else a seller submits
/// (price, images, category, ...) is carried in [`attributes`](Self::attributes)
/// and stored untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned document ID. `None` until the product is persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name. This is the only field the search endpoint looks at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The seller who listed this product.
    #[serde(rename = "sellerID", skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    /// Remaining fields of the submitted document, preserved as-is.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Whether the product name contains `query`, ignoring ASCII and Unicode
    /// case. Products without a name never match.
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&query.to_lowercase()))
    }
}
