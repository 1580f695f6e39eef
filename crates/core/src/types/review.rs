//! Product review document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product review.
///
/// Reviews are entirely free-form: rating, text, author, and anything else
/// the storefront submits are stored verbatim. The API only ever assigns the
/// document ID and hands reviews back out in random samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned document ID. `None` until the review is persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The submitted review payload, preserved as-is.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}
