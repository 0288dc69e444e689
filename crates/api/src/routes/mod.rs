//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health             - Health check (public)
//!
//! # Auth
//! POST /api/auth/login         - Verify credentials, issue bearer token (public)
//! GET  /api/auth/validate      - Validate bearer token
//!
//! # Customers (all require a bearer token)
//! GET    /api/customers        - Paginated listing with optional search
//! POST   /api/customers        - Create customer
//! GET    /api/customers/{id}   - Customer detail
//! PUT    /api/customers/{id}   - Partial update
//! DELETE /api/customers/{id}   - Delete customer
//! ```
//!
//! Unrecognized routes fall through to a 404 with the standard envelope.

pub mod auth;
pub mod customers;
pub mod extract;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/validate", get(auth::validate))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::remove),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/customers", customer_routes())
        .route("/api/health", get(health::health))
        .fallback(not_found)
}

/// Fallback for unrecognized routes.
async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
