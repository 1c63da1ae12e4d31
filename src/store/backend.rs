//! Accessor traits for the external stores.
//!
//! Content resolution only ever reads through these traits, so templates, events,
//! plan-event mappings and configuration may live in PostgreSQL, in memory, or
//! anywhere else an implementation can reach.
//!
//! # Thread Safety
//!
//! Implementations must be `Send + Sync`; a single set of accessors is shared by
//! every concurrent resolution.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EmailTemplate, Event, PlanEventMapping};
use crate::error::StoreResult;

/// Flat key/value application configuration.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Value stored under `name`, or `None` when the key is not configured.
    async fn value_by_name(&self, name: &str) -> StoreResult<Option<String>>;
}

/// Email templates and per-subscription bodies.
///
/// The two lookups are independent and may be served from different storage.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Body text prepared for a subscription and process status.
    async fn email_body_for_subscription(
        &self,
        subscription_id: Uuid,
        process_status: &str,
    ) -> StoreResult<String>;

    /// Template registered under a status key, if any.
    async fn template_for_status(&self, status: &str) -> StoreResult<Option<EmailTemplate>>;
}

/// Lifecycle event definitions.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Event named `name`. Unknown names are `StoreError::NotFound`.
    async fn by_name(&self, name: &str) -> StoreResult<Event>;
}

/// Recipients configured per (plan, event).
#[async_trait]
pub trait PlanEventStore: Send + Sync {
    /// Mapping for the pair, or `None` when nothing is configured.
    async fn plan_event(&self, plan_id: Uuid, event_id: i32)
        -> StoreResult<Option<PlanEventMapping>>;
}
