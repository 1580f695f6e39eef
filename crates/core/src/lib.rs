//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across all Driftwood Market components:
//! - `api` - Public REST API for products, orders, reviews, and payments
//! - `integration-tests` - In-process and live API test suites
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Marketplace documents and newtype wrappers for IDs and amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
