//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{CustomerStore, PgCustomerStore};
use crate::services::{AuthService, CustomerService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources. The dependency graph is constructed exactly once, here, and
/// passed down explicitly - no global registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    auth: AuthService,
    customers: CustomerService,
}

impl AppState {
    /// Create the application state over the production Postgres store.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let store = Arc::new(PgCustomerStore::new(pool.clone()));
        Self::with_store(config, pool, store)
    }

    /// Create the application state with an explicit store implementation.
    ///
    /// This is the seam the offline test suites use to run the full HTTP
    /// pipeline over the in-memory store.
    #[must_use]
    pub fn with_store(config: ApiConfig, pool: PgPool, store: Arc<dyn CustomerStore>) -> Self {
        let auth = AuthService::new(&config.admin, &config.token);
        let customers = CustomerService::new(store);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                auth,
                customers,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the credential verifier.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the customer service.
    #[must_use]
    pub fn customers(&self) -> &CustomerService {
        &self.inner.customers
    }
}
