//! Request error type and its HTTP rendering.
//!
//! Handlers return `Result<T, AppError>`; the `IntoResponse` impl maps each
//! variant to a status code, reports server-class failures to Sentry, and
//! renders a JSON body of the shape `{"error": "<message>"}` so storefront
//! clients can surface failures uniformly.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use driftwood_core::SellerId;

use crate::db::StoreError;
use crate::services::identity::IdentityError;
use crate::services::payments::PaymentError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Identity provider verification failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Payment gateway operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller sent something malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unclassified server-side failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body sent with every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry. A rejected token is the caller's
        // problem, not ours; everything else from the identity provider is.
        let is_server_error = match &self {
            Self::Store(_) | Self::Internal(_) | Self::Payment(_) => true,
            Self::Identity(err) => !matches!(err, IdentityError::Rejected(_)),
            Self::NotFound(_) | Self::Unauthorized(_) | Self::BadRequest(_) => false,
        };
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(_) | Self::Internal(_) | Self::Payment(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Identity(err) => match err {
                IdentityError::Rejected(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Server-class messages stay generic; the detail is in the log
        let message = match &self {
            Self::Store(_) | Self::Internal(_) | Self::Payment(_) => {
                "Internal server error".to_string()
            }
            Self::Identity(err) => match err {
                IdentityError::Rejected(_) => "Invalid or expired token".to_string(),
                _ => "Internal server error".to_string(),
            },
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Set the Sentry user context from a verified seller ID.
///
/// Call this after token verification to associate errors with sellers.
pub fn set_sentry_seller(seller: &SellerId) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(seller.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order-57".to_string());
        assert_eq!(err.to_string(), "Not found: order-57");

        let err = AppError::BadRequest("malformed page number".to_string());
        assert_eq!(err.to_string(), "Bad request: malformed page number");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("missing".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("no token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("bad page".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Identity(IdentityError::Rejected(
                "expired".to_string()
            ))),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Identity(IdentityError::Api {
                status: 503,
                message: "unavailable".to_string()
            })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::NotFound("nothing here".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Not found: nothing here");
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response = AppError::Internal("mongo exploded".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }
}
