//! Identity provider client for bearer-token verification.
//!
//! Sellers authenticate with the marketplace's identity provider and send
//! the resulting ID token as a bearer credential. The API does not decode
//! tokens itself; it posts them to the provider's `accounts:lookup` endpoint
//! and trusts the account ID that comes back.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use driftwood_core::SellerId;

use crate::config::IdentityConfig;

/// Token lookup endpoint, relative to the provider base URL.
const LOOKUP_PATH: &str = "/v1/accounts:lookup";

/// Errors that can occur when verifying a token.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The request never completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider refused the token.
    #[error("Token rejected: {0}")]
    Rejected(String),

    /// The provider answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not the shape we expect.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Verifies bearer tokens and resolves them to seller IDs.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve `token` to the seller it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] for tokens the provider refuses;
    /// the other variants mean the provider itself failed.
    async fn verify(&self, token: &str) -> Result<SellerId, IdentityError>;
}

/// REST client for the identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    lookup_url: String,
    api_key: SecretString,
}

impl IdentityClient {
    /// Create a new identity provider client.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            lookup_url: format!("{}{LOOKUP_PATH}", config.base_url),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for IdentityClient {
    async fn verify(&self, token: &str) -> Result<SellerId, IdentityError> {
        let response = self
            .client
            .post(&self.lookup_url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await?;
        let status = response.status();

        // The provider answers 400 for malformed, expired, and revoked tokens.
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(extract_error_message(&body)));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;

        lookup
            .users
            .into_iter()
            .next()
            .map(|user| SellerId::new(user.local_id))
            .ok_or_else(|| {
                IdentityError::Rejected("token does not resolve to an account".to_string())
            })
    }
}

/// Account lookup response.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

/// One account record in a lookup response.
#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
}

/// Pull the human-readable message out of a provider error body, e.g.
/// `{"error": {"message": "INVALID_ID_TOKEN"}}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "invalid or expired token".to_string())
}
