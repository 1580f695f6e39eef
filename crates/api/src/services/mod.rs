//! External service clients for the API.
//!
//! # Services
//!
//! - `identity` - Bearer-token verification against the identity provider
//! - `payments` - Payment intent creation through Stripe
//!
//! Both services are reached through traits ([`IdentityVerifier`],
//! [`PaymentGateway`]) so the `integration-tests` crate can swap in
//! deterministic fakes.

pub mod identity;
pub mod payments;

pub use identity::{IdentityClient, IdentityError, IdentityVerifier};
pub use payments::{PaymentError, PaymentGateway, PaymentsClient};
