//! Request guards for the API.

pub mod auth;

pub use auth::{CurrentUser, RequireAuth};
