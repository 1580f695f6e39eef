//! Bearer-token extraction for seller endpoints.
//!
//! Provides an extractor that pulls the raw token off the `Authorization`
//! header. Extraction only checks the header shape; handlers still have to
//! pass the token to the identity provider before trusting it.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;

/// Extractor for the bearer credential of seller endpoints.
///
/// Rejects with 401 when the header is missing, uses another scheme, or
/// carries an empty token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     BearerToken(token): BearerToken,
/// ) -> impl IntoResponse {
///     // hand `token` to the identity verifier
/// }
/// ```
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_string()))?;

        if token.is_empty() {
            return Err(AppError::Unauthorized("Empty bearer token".to_string()));
        }

        Ok(Self(token.to_owned()))
    }
}
