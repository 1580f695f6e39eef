//! Newtype ID for type-safe seller references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The identifier of a seller account.
///
/// Seller IDs are opaque strings minted by the identity provider (the
/// `localId` of the verified account). Wrapping them in a newtype prevents
/// accidentally mixing them up with document IDs, which are also strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

impl SellerId {
    /// Create a seller ID from an identity-provider account ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SellerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SellerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<SellerId> for String {
    fn from(id: SellerId) -> Self {
        id.0
    }
}
