//! Customer persistence.
//!
//! # Tables
//!
//! - `customer` - The sole persisted entity (see `migrations/`)
//!
//! The [`CustomerStore`] trait is the capability contract the service layer
//! programs against; [`PgCustomerStore`] is the production implementation and
//! [`MemoryCustomerStore`] backs the offline test suites.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryCustomerStore;
pub use postgres::PgCustomerStore;

use clientele_core::{CustomerId, Email};

use crate::models::{Customer, CustomerPatch, NewCustomer};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Parameters for a paginated customer listing.
///
/// `page` and `limit` are 1-based and must be positive; the controller layer
/// rejects anything else before the store sees it.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    /// Case-insensitive substring match against name, email and phone.
    pub search: Option<String>,
}

/// A page of results together with pagination metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Count of matching rows irrespective of pagination.
    pub total: i64,
    pub page: i64,
    /// `ceil(total / limit)`.
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Assemble a page from its parts, deriving `total_pages`.
    #[must_use]
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            data,
            total,
            page,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// Capability contract for customer persistence.
///
/// Validation is the service's responsibility; implementations persist
/// whatever they are given.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Paginated listing, newest first.
    async fn list(&self, params: &ListParams) -> Result<Page<Customer>, StoreError>;

    /// Fetch a customer by ID.
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Fetch a customer by exact email.
    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, StoreError>;

    /// Persist a new customer, assigning its ID and timestamps.
    ///
    /// Returns [`StoreError::Conflict`] when the email is already taken; the
    /// database unique constraint is the authoritative guard against
    /// concurrent creates racing past the service's advisory pre-check.
    async fn create(&self, input: &NewCustomer) -> Result<Customer, StoreError>;

    /// Apply a partial update, refreshing `updated_at`.
    ///
    /// Omitted fields are left untouched. Returns `None` when the row no
    /// longer exists (a delete raced in between).
    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, StoreError>;

    /// Delete a customer. Returns true iff a row existed and was removed.
    async fn delete(&self, id: CustomerId) -> Result<bool, StoreError>;

    /// Whether a customer with this email exists, optionally excluding one
    /// record (so a customer may keep its own email on update).
    async fn email_exists(
        &self,
        email: &str,
        exclude: Option<CustomerId>,
    ) -> Result<bool, StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::<()>::new(Vec::new(), 25, 1, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_division() {
        let page = Page::<()>::new(Vec::new(), 30, 1, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_empty() {
        let page = Page::<()>::new(Vec::new(), 0, 1, 10);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::<i32>::new(vec![1, 2], 2, 1, 10);
        let json = serde_json::to_value(&page).expect("serializable");
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["total"], 2);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
