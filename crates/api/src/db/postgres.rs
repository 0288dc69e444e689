//! `PostgreSQL` implementation of the customer store.
//!
//! Queries use the runtime sqlx API so the workspace builds without a live
//! database; row decoding goes through `Customer`'s `FromRow` derive.

use async_trait::async_trait;
use sqlx::PgPool;

use clientele_core::{CustomerId, Email};

use super::{CustomerStore, ListParams, Page, StoreError};
use crate::models::{Customer, CustomerPatch, NewCustomer};

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, address, created_at, updated_at";

/// `PostgreSQL`-backed customer store.
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Create a new store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn list(&self, params: &ListParams) -> Result<Page<Customer>, StoreError> {
        let offset = (params.page - 1) * params.limit;
        let pattern = params.search.as_ref().map(|s| format!("%{s}%"));

        let (total, data) = if let Some(pattern) = pattern {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM customer \
                 WHERE name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1",
            )
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

            let data = sqlx::query_as::<_, Customer>(&format!(
                "SELECT {CUSTOMER_COLUMNS} FROM customer \
                 WHERE name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
            ))
            .bind(&pattern)
            .bind(params.limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, data)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
                .fetch_one(&self.pool)
                .await?;

            let data = sqlx::query_as::<_, Customer>(&format!(
                "SELECT {CUSTOMER_COLUMNS} FROM customer \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(params.limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, data)
        };

        Ok(Page::new(data, total, params.page, params.limit))
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, input: &NewCustomer) -> Result<Customer, StoreError> {
        let id = CustomerId::generate();

        let row = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customer (id, name, email, phone, address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict("email already exists".to_owned());
            }
            StoreError::Database(e)
        })?;

        Ok(row)
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customer SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                address = COALESCE($5, address), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.address.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict("email already exists".to_owned());
            }
            StoreError::Database(e)
        })?;

        Ok(row)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude: Option<CustomerId>,
    ) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM customer \
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2) \
            )",
        )
        .bind(email)
        .bind(exclude.map(|id| id.as_uuid()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
