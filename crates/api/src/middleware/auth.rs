//! Authentication guard for customer routes.
//!
//! Provides an extractor that requires a valid bearer token and exposes the
//! caller identity to the handler.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller identity attached to every authenticated request.
///
/// There is exactly one role; every verified caller is the administrator.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: String,
}

/// Extractor that requires bearer-token authentication.
///
/// Requires the exact header shape `Authorization: Bearer <token>` and a
/// token that verifies. On failure the handler never runs; the rejection is
/// translated by the error boundary.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized("No authorization header provided".to_string())
            })?;

        // Exact shape: two space-separated parts, scheme "Bearer".
        let mut segments = header_value.split(' ');
        let token = match (segments.next(), segments.next(), segments.next()) {
            (Some("Bearer"), Some(token), None) => token,
            _ => {
                return Err(ApiError::Unauthorized(
                    "Invalid authorization header format".to_string(),
                ));
            }
        };

        let claims = state.auth().verify(token)?;

        Ok(Self(CurrentUser {
            username: claims.username,
            role: "admin".to_string(),
        }))
    }
}
