//! In-memory accessors using DashMap.
//!
//! `MemoryStore` implements all four accessor traits. It is populated up front with
//! the builder-style `with_*` methods and is read-only afterwards.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{EmailTemplate, Event, PlanEventMapping};
use crate::error::{StoreError, StoreResult};

use super::backend::{ConfigurationStore, EventStore, PlanEventStore, TemplateStore};

#[derive(Default)]
pub struct MemoryStore {
    configuration: DashMap<String, String>,
    templates: DashMap<String, EmailTemplate>,
    bodies: DashMap<(Uuid, String), String>,
    events: DashMap<String, Event>,
    plan_events: DashMap<(Uuid, i32), PlanEventMapping>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.insert(name.into(), value.into());
        self
    }

    pub fn with_template(self, template: EmailTemplate) -> Self {
        self.templates.insert(template.status.clone(), template);
        self
    }

    pub fn with_body(
        self,
        subscription_id: Uuid,
        process_status: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.bodies
            .insert((subscription_id, process_status.into()), body.into());
        self
    }

    pub fn with_event(self, event: Event) -> Self {
        self.events.insert(event.events_name.clone(), event);
        self
    }

    pub fn with_plan_event(self, mapping: PlanEventMapping) -> Self {
        self.plan_events
            .insert((mapping.plan_id, mapping.event_id), mapping);
        self
    }
}

#[async_trait]
impl ConfigurationStore for MemoryStore {
    async fn value_by_name(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.configuration.get(name).map(|v| v.clone()))
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn email_body_for_subscription(
        &self,
        subscription_id: Uuid,
        process_status: &str,
    ) -> StoreResult<String> {
        self.bodies
            .get(&(subscription_id, process_status.to_string()))
            .map(|b| b.clone())
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "email body for subscription {} ({})",
                    subscription_id, process_status
                ))
            })
    }

    async fn template_for_status(&self, status: &str) -> StoreResult<Option<EmailTemplate>> {
        Ok(self.templates.get(status).map(|t| t.clone()))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn by_name(&self, name: &str) -> StoreResult<Event> {
        self.events
            .get(name)
            .map(|e| e.clone())
            .ok_or_else(|| StoreError::NotFound(format!("event {}", name)))
    }
}

#[async_trait]
impl PlanEventStore for MemoryStore {
    async fn plan_event(
        &self,
        plan_id: Uuid,
        event_id: i32,
    ) -> StoreResult<Option<PlanEventMapping>> {
        Ok(self.plan_events.get(&(plan_id, event_id)).map(|m| m.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configuration_lookup() {
        let store = MemoryStore::new().with_config("SMTPHost", "smtp.contoso.com");

        assert_eq!(
            store.value_by_name("SMTPHost").await.unwrap().as_deref(),
            Some("smtp.contoso.com")
        );
        assert_eq!(store.value_by_name("SMTPPort").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let store = MemoryStore::new().with_event(Event::new(1, "Activate"));

        assert_eq!(store.by_name("Activate").await.unwrap().events_id, 1);
        assert!(matches!(
            store.by_name("Unsubscribe").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_body_keyed_by_subscription_and_status() {
        let subscription_id = Uuid::new_v4();
        let store = MemoryStore::new().with_body(subscription_id, "success", "Activated");

        assert_eq!(
            store
                .email_body_for_subscription(subscription_id, "success")
                .await
                .unwrap(),
            "Activated"
        );
        assert!(store
            .email_body_for_subscription(subscription_id, "failure")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_plan_event_absent_is_none() {
        let plan_id = Uuid::new_v4();
        let store =
            MemoryStore::new().with_plan_event(PlanEventMapping::new(plan_id, 2, "ops@contoso.com"));

        assert!(store.plan_event(plan_id, 2).await.unwrap().is_some());
        assert!(store.plan_event(plan_id, 3).await.unwrap().is_none());
        assert!(store.plan_event(Uuid::new_v4(), 2).await.unwrap().is_none());
    }
}
