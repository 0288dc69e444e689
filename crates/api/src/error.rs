//! Unified error handling for the API.
//!
//! Every domain error is raised at the service or guard layer and converted
//! exactly once, here, into the JSON envelope `{success: false, message}`.
//! In development the envelope additionally carries a `trace` field with the
//! debug rendering of the error; in production internal details are replaced
//! with a generic message.

use std::sync::OnceLock;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{AuthError, CustomerError};

/// Whether error responses carry diagnostic traces. Latched once at startup
/// from the loaded configuration; `IntoResponse` has no access to state.
static EXPOSE_TRACES: OnceLock<bool> = OnceLock::new();

/// Latch the trace-exposure flag. Later calls are ignored.
pub fn set_trace_exposure(expose: bool) {
    let _ = EXPOSE_TRACES.set(expose);
}

fn traces_exposed() -> bool {
    EXPOSE_TRACES.get().copied().unwrap_or(false)
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, caught before business logic.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid, or expired credentials or token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced resource is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Field-constraint violations; the message is a semicolon-joined list.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Anything unanticipated, including unclassified store failures.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => Self::NotFound(err.to_string()),
            CustomerError::EmailTaken => Self::Conflict(err.to_string()),
            CustomerError::Validation(message) => Self::Validation(message),
            CustomerError::DeleteFailed | CustomerError::Store(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::TokenCreation(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal errors are reported; client errors are not.
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Client errors carry their bare message (no variant prefix);
        // internal details are not exposed outside development.
        let message = match &self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::Validation(m) => m.clone(),
            Self::Internal(m) => {
                if traces_exposed() {
                    m.clone()
                } else {
                    "Internal server error".to_string()
                }
            }
        };

        let trace = traces_exposed().then(|| format!("{self:?}"));

        let body = ErrorBody {
            success: false,
            message,
            trace,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            get_status(ApiError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ApiError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(ApiError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_customer_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(CustomerError::EmailTaken),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(CustomerError::NotFound(
                clientele_core::CustomerId::generate()
            )),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(CustomerError::DeleteFailed),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            ApiError::from(CustomerError::Validation("Name is required".to_string())),
            ApiError::Validation(_)
        ));
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidToken),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_conflict_message_is_preserved() {
        let err = ApiError::from(CustomerError::EmailTaken);
        assert!(matches!(
            &err,
            ApiError::Conflict(m) if m == "Email already registered"
        ));
    }
}
