//! Shared helpers for Clientele integration tests.
//!
//! The tests in `tests/` run against a live API instance; see the module
//! docs there for the required environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Administrator username the server under test is configured with.
#[must_use]
pub fn admin_username() -> String {
    std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string())
}

/// Administrator password the server under test is configured with.
#[must_use]
pub fn admin_password() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string())
}
