//! Stripe client for payment intent creation.
//!
//! Checkout asks the API for a payment intent before confirming the card on
//! the client side. Only the intent's `client_secret` ever leaves this
//! module; the Stripe secret key stays server-side.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use driftwood_core::Amount;

use crate::config::StripeConfig;

/// Payment intent endpoint, relative to the Stripe base URL.
const PAYMENT_INTENTS_PATH: &str = "/v1/payment_intents";

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The request never completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not the shape we expect.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Creates payment intents for checkout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for `amount` and return its client secret.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the gateway refuses the intent or cannot
    /// be reached. Amount validation is the gateway's job; whatever it
    /// rejects comes back as [`PaymentError::Api`].
    async fn create_intent(&self, amount: Amount) -> Result<String, PaymentError>;
}

/// REST client for Stripe.
#[derive(Clone)]
pub struct PaymentsClient {
    client: reqwest::Client,
    intents_url: String,
    secret_key: SecretString,
    currency: String,
}

impl PaymentsClient {
    /// Create a new Stripe client.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: &StripeConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            intents_url: format!("{}{PAYMENT_INTENTS_PATH}", config.base_url),
            secret_key: config.secret_key.clone(),
            currency: config.currency.clone(),
        })
    }
}

#[async_trait]
impl PaymentGateway for PaymentsClient {
    async fn create_intent(&self, amount: Amount) -> Result<String, PaymentError> {
        // Stripe takes form-encoded params; nested fields use bracket syntax.
        let params = [
            ("amount", amount.as_i64().to_string()),
            ("currency", self.currency.clone()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let response = self
            .client
            .post(&self.intents_url)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&params)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(intent.client_secret)
    }
}

/// The slice of a payment intent resource the API cares about.
#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: String,
}

/// Pull the human-readable message out of a Stripe error body, e.g.
/// `{"error": {"message": "Amount must be at least ..."}}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "payment intent creation failed".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_intent_parses_client_secret() {
        let body = r#"{
            "id": "pi_3MtwBwLkdIwHu7ix28a3tqPa",
            "object": "payment_intent",
            "amount": 1099,
            "client_secret": "pi_3MtwBwLkdIwHu7ix28a3tqPa_secret_YrKJUKribcBjcG8HVhfZluoGH",
            "currency": "usd",
            "status": "requires_payment_method"
        }"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(
            intent.client_secret,
            "pi_3MtwBwLkdIwHu7ix28a3tqPa_secret_YrKJUKribcBjcG8HVhfZluoGH"
        );
    }

    #[test]
    fn test_extract_error_message_from_stripe_body() {
        let body = r#"{"error":{"type":"invalid_request_error","message":"Amount must convert to at least 50 cents."}}"#;
        assert_eq!(
            extract_error_message(body),
            "Amount must convert to at least 50 cents."
        );
    }

    #[test]
    fn test_extract_error_message_falls_back_on_garbage() {
        assert_eq!(
            extract_error_message("stripe is down"),
            "payment intent creation failed"
        );
    }

    #[test]
    fn test_payment_error_display() {
        let err = PaymentError::Api {
            status: 402,
            message: "Your card was declined.".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 402 - Your card was declined.");
    }
}
