//! Core types for Driftwood Market.
//!
//! This module provides the marketplace document models and type-safe
//! wrappers for common domain concepts.

pub mod amount;
pub mod id;
pub mod order;
pub mod product;
pub mod review;

pub use amount::Amount;
pub use id::SellerId;
pub use order::Order;
pub use product::Product;
pub use review::Review;
