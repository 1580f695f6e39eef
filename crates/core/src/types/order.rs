//! Seller order document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::id::SellerId;

/// An order placed with a seller.
///
/// Orders are submitted in bulk by the checkout pipeline and the API does not
/// enforce a schema on them. The named fields below are the ones the
/// marketplace conventionally populates; anything else rides along in
/// [`attributes`](Self::attributes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned document ID. `None` until the order is persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The purchasing customer, as reported by checkout.
    #[serde(rename = "customerId", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Value>,
    /// Line items of the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Value>,
    /// Order total, in whatever unit checkout reported.
    #[serde(rename = "totalAmount", skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Value>,
    /// The seller the order belongs to. Listing is filtered on this field.
    #[serde(rename = "sellerID", skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    /// Server-stamped creation time.
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Remaining fields of the submitted document, preserved as-is.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_names_match_the_stored_documents() {
        let document = json!({
            "_id": "o-1",
            "customerId": "cust-7",
            "products": [{ "productId": "p-1", "quantity": 2 }],
            "totalAmount": 139.98,
            "sellerID": "seller-3",
            "createdAt": "2026-08-22T10:15:30.123Z",
            "note": "gift wrap"
        });

        let order: Order = serde_json::from_value(document.clone()).unwrap();
        assert_eq!(order.id.as_deref(), Some("o-1"));
        assert_eq!(order.seller_id, Some(SellerId::from("seller-3")));
        assert_eq!(order.total_amount, Some(json!(139.98)));
        assert_eq!(order.attributes.get("note"), Some(&json!("gift wrap")));

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let order = Order::default();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value, json!({}));
    }
}
