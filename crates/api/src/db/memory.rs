//! In-memory implementation of the customer store.
//!
//! Backs the offline unit and router test suites through the same
//! [`CustomerStore`] contract as the `PostgreSQL` store. Records are kept in
//! insertion order, which matches creation-time order.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use clientele_core::{CustomerId, Email};

use super::{CustomerStore, ListParams, Page, StoreError};
use crate::models::{Customer, CustomerPatch, NewCustomer};

/// Customer store holding records in process memory.
#[derive(Default)]
pub struct MemoryCustomerStore {
    rows: Mutex<Vec<Customer>>,
}

impl MemoryCustomerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::unwrap_used)] // a poisoned lock means a panic mid-mutation
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Customer>> {
        self.rows.lock().unwrap()
    }
}

fn matches_search(customer: &Customer, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    customer.name.to_lowercase().contains(&needle)
        || customer.email.as_str().to_lowercase().contains(&needle)
        || customer.phone.to_lowercase().contains(&needle)
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn list(&self, params: &ListParams) -> Result<Page<Customer>, StoreError> {
        let rows = self.lock();

        // Newest first: reverse insertion order.
        let matching: Vec<&Customer> = rows
            .iter()
            .rev()
            .filter(|c| {
                params
                    .search
                    .as_deref()
                    .is_none_or(|needle| matches_search(c, needle))
            })
            .collect();

        #[allow(clippy::cast_possible_wrap)]
        let total = matching.len() as i64;
        #[allow(clippy::cast_sign_loss)]
        let offset = ((params.page - 1) * params.limit) as usize;
        #[allow(clippy::cast_sign_loss)]
        let limit = params.limit as usize;

        let data = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page::new(data, total, params.page, params.limit))
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        Ok(self.lock().iter().find(|c| c.id == id).cloned())
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, StoreError> {
        Ok(self.lock().iter().find(|c| &c.email == email).cloned())
    }

    async fn create(&self, input: &NewCustomer) -> Result<Customer, StoreError> {
        let email = Email::parse(&input.email)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email: {e}")))?;

        let mut rows = self.lock();

        // Mirror the database unique constraint.
        if rows.iter().any(|c| c.email == email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::generate(),
            name: input.name.clone(),
            email,
            phone: input.phone.clone(),
            address: input.address.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(customer.clone());

        Ok(customer)
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, StoreError> {
        let email = patch
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| StoreError::DataCorruption(format!("invalid email: {e}")))?;

        let mut rows = self.lock();

        if let Some(email) = &email
            && rows.iter().any(|c| &c.email == email && c.id != id)
        {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let Some(customer) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            customer.name.clone_from(name);
        }
        if let Some(email) = email {
            customer.email = email;
        }
        if let Some(phone) = &patch.phone {
            customer.phone.clone_from(phone);
        }
        if let Some(address) = &patch.address {
            customer.address.clone_from(address);
        }
        customer.updated_at = Utc::now();

        Ok(Some(customer.clone()))
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, StoreError> {
        let mut rows = self.lock();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude: Option<CustomerId>,
    ) -> Result<bool, StoreError> {
        let rows = self.lock();
        Ok(rows
            .iter()
            .any(|c| c.email.as_str() == email && exclude.is_none_or(|id| c.id != id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            phone: "(11) 98765-4321".to_string(),
            address: "Rua Exemplo, 123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryCustomerStore::new();
        let a = store.create(&input("Alice Prado", "a@example.com")).await.unwrap();
        let b = store.create(&input("Bruno Costa", "b@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let store = MemoryCustomerStore::new();
        store.create(&input("Alice Prado", "a@example.com")).await.unwrap();
        let err = store
            .create(&input("Impostor", "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryCustomerStore::new();
        store.create(&input("First Person", "first@example.com")).await.unwrap();
        store.create(&input("Second Person", "second@example.com")).await.unwrap();

        let page = store
            .list(&ListParams {
                page: 1,
                limit: 10,
                search: None,
            })
            .await
            .unwrap();

        assert_eq!(page.data[0].name, "Second Person");
        assert_eq!(page.data[1].name, "First Person");
    }

    #[tokio::test]
    async fn test_email_exists_respects_exclusion() {
        let store = MemoryCustomerStore::new();
        let created = store.create(&input("Alice Prado", "a@example.com")).await.unwrap();

        assert!(store.email_exists("a@example.com", None).await.unwrap());
        assert!(
            !store
                .email_exists("a@example.com", Some(created.id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let store = MemoryCustomerStore::new();
        let created = store.create(&input("Alice Prado", "a@example.com")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
    }
}
