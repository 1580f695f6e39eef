//! Driftwood Market API - marketplace REST backend.
//!
//! This library wires a `MongoDB`-backed product, order, and review store to
//! an Axum HTTP surface, verifies seller identities against an external
//! identity provider, and creates payment intents through Stripe.
//!
//! The binary in `main.rs` assembles the production configuration; the
//! `integration-tests` crate assembles the same router against in-memory
//! stores.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Store traits and their `MongoDB` implementations
//! - [`error`] - Unified request error type with Sentry capture
//! - [`middleware`] - Request extractors (bearer tokens)
//! - [`routes`] - HTTP route table and handlers
//! - [`services`] - Identity verification and payment gateway clients
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
