//! Monetary amount representation for payment intents.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A monetary amount in the smallest unit of its currency (e.g. cents for
/// USD).
///
/// The API performs no arithmetic on amounts. Callers supply the value they
/// want to charge and it is forwarded to the payment gateway verbatim; the
/// gateway is the one that rejects amounts it considers invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from a value in the smallest currency unit.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the underlying value in the smallest currency unit.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
