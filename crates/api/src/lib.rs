//! Clientele API - customer-relationship management service.
//!
//! A REST API exposing authentication and CRUD over a single `Customer`
//! entity. Control flow per request: guard (auth routes bypass it) →
//! router → handler → service → store → database, with one error boundary
//! converting domain errors into the JSON envelope.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `PostgreSQL` via sqlx for customer records
//! - Stateless HS256 bearer tokens for the single administrator identity
//! - Configuration from environment variables, immutable after startup

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

pub use config::ApiConfig;
pub use state::AppState;

/// Build the application router over the given state.
///
/// Observability layers (request tracing, CORS, Sentry) are added by the
/// binary; this is the full routing tree and is what the in-process test
/// suites drive.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}
