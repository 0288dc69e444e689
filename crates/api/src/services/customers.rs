//! Customer business rules.
//!
//! Enforces email uniqueness and field validation before delegating to the
//! store, and translates store results into domain errors. The uniqueness
//! pre-check is advisory; the database constraint is authoritative, and a
//! store-level conflict surfaces as the same error as a failed pre-check.

use std::sync::Arc;

use thiserror::Error;

use clientele_core::CustomerId;

use crate::db::{CustomerStore, ListParams, Page, StoreError};
use crate::models::{Customer, CustomerPatch, NewCustomer};

/// Errors that can occur during customer operations.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Referenced customer does not exist.
    #[error("Customer with ID {0} not found")]
    NotFound(CustomerId),

    /// Another customer already owns the requested email.
    #[error("Email already registered")]
    EmailTaken,

    /// One or more field constraints were violated. The message is the
    /// semicolon-joined list of violations.
    #[error("{0}")]
    Validation(String),

    /// A delete affected no rows although existence was just confirmed.
    #[error("Failed to delete customer")]
    DeleteFailed,

    /// Store-level failure not otherwise classified.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Fold a store conflict into the domain's duplicate-email error.
///
/// Concurrent creates racing on the same email are arbitrated by the
/// database unique constraint; the loser must see a conflict, not an
/// internal error.
fn conflict_as_email_taken(err: StoreError) -> CustomerError {
    match err {
        StoreError::Conflict(_) => CustomerError::EmailTaken,
        other => CustomerError::Store(other),
    }
}

/// Customer business rules over a [`CustomerStore`].
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Paginated listing; pure pass-through to the store.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Store` if the store fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Customer>, CustomerError> {
        Ok(self.store.list(params).await?)
    }

    /// Fetch a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Create a customer from validated input.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::EmailTaken` if the email is already
    /// registered, or `CustomerError::Validation` listing every violated
    /// field constraint.
    pub async fn create(&self, input: NewCustomer) -> Result<Customer, CustomerError> {
        if self.store.email_exists(&input.email, None).await? {
            return Err(CustomerError::EmailTaken);
        }

        let violations = input.violations();
        if !violations.is_empty() {
            return Err(CustomerError::Validation(violations.join("; ")));
        }

        self.store
            .create(&input)
            .await
            .map_err(conflict_as_email_taken)
    }

    /// Apply a partial update. Only supplied fields are validated and
    /// changed; omitted fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist
    /// (including when a concurrent delete wins the race between the
    /// existence check and the update), `CustomerError::EmailTaken` if the
    /// supplied email belongs to another customer, or
    /// `CustomerError::Validation` for violated constraints.
    pub async fn update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, CustomerError> {
        if self.store.get_by_id(id).await?.is_none() {
            return Err(CustomerError::NotFound(id));
        }

        // The uniqueness check must not run when email is omitted.
        if let Some(email) = &patch.email
            && self.store.email_exists(email, Some(id)).await?
        {
            return Err(CustomerError::EmailTaken);
        }

        let violations = patch.violations();
        if !violations.is_empty() {
            return Err(CustomerError::Validation(violations.join("; ")));
        }

        match self
            .store
            .update(id, &patch)
            .await
            .map_err(conflict_as_email_taken)?
        {
            Some(customer) => Ok(customer),
            // Row vanished between the existence check and the update.
            None => Err(CustomerError::NotFound(id)),
        }
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist, or
    /// `CustomerError::DeleteFailed` if the delete affected no rows after
    /// existence was confirmed.
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        if self.store.get_by_id(id).await?.is_none() {
            return Err(CustomerError::NotFound(id));
        }

        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(CustomerError::DeleteFailed)
        }
    }
}
