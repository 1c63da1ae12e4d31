//! Read-only accessors for templates, events, plan-event mappings and configuration.
//!
//! # Backends
//!
//! - `MemoryStore`: DashMap-backed, populated up front (tests, embedded use)
//! - `PostgresStores`: sqlx queries against the portal database
//!
//! Use `create_stores()` to build the set selected by configuration.

mod backend;
mod memory;
mod postgres;

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::postgres::PostgresPool;

pub use backend::{ConfigurationStore, EventStore, PlanEventStore, TemplateStore};
pub use memory::MemoryStore;
pub use postgres::PostgresStores;

/// The four accessors a resolver reads from.
#[derive(Clone)]
pub struct ContentStores {
    pub configuration: Arc<dyn ConfigurationStore>,
    pub templates: Arc<dyn TemplateStore>,
    pub events: Arc<dyn EventStore>,
    pub plan_events: Arc<dyn PlanEventStore>,
}

impl ContentStores {
    /// Use one backend for every accessor.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: ConfigurationStore + TemplateStore + EventStore + PlanEventStore + 'static,
    {
        Self {
            configuration: backend.clone(),
            templates: backend.clone(),
            events: backend.clone(),
            plan_events: backend,
        }
    }
}

/// Create the accessors based on configuration.
///
/// - `"postgres"`: `PostgresStores` if a pool is provided
/// - `"memory"`: an empty `MemoryStore`
///
/// # Example
///
/// ```rust,ignore
/// let stores = create_stores(&settings.store, Some(pool));
/// ```
pub fn create_stores(settings: &StoreConfig, postgres_pool: Option<PostgresPool>) -> ContentStores {
    match settings.backend.as_str() {
        "postgres" => {
            if let Some(pool) = postgres_pool {
                tracing::info!(
                    backend = "postgres",
                    url = %pool.database_url_masked(),
                    "Creating PostgreSQL content stores"
                );
                ContentStores::from_backend(Arc::new(PostgresStores::new(pool.pool().clone())))
            } else {
                tracing::warn!(
                    "PostgreSQL stores requested but no pool provided, falling back to memory"
                );
                ContentStores::from_backend(Arc::new(MemoryStore::new()))
            }
        }
        _ => {
            tracing::info!(backend = "memory", "Creating memory content stores");
            ContentStores::from_backend(Arc::new(MemoryStore::new()))
        }
    }
}
