//! PostgreSQL-based accessors.
//!
//! Read-only queries against the tables maintained by the subscription portal:
//!
//! - `application_configuration (name, value)`
//! - `email_templates (status, subject, template_body, cc, bcc)`
//! - `subscription_email_bodies (subscription_id, process_status, body)`
//! - `events (events_id, events_name)`
//! - `plan_events_mapping (plan_id, event_id, success_state_emails, copy_to_customer)`

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{EmailTemplate, Event, PlanEventMapping};
use crate::error::{StoreError, StoreResult};

use super::backend::{ConfigurationStore, EventStore, PlanEventStore, TemplateStore};

/// PostgreSQL implementation of all four accessors.
#[derive(Clone)]
pub struct PostgresStores {
    pool: PgPool,
}

impl PostgresStores {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable("PostgreSQL pool is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigurationStore for PostgresStores {
    async fn value_by_name(&self, name: &str) -> StoreResult<Option<String>> {
        self.check_open()?;

        let value: Option<(Option<String>,)> = sqlx::query_as(
            r#"
            SELECT value
            FROM application_configuration
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value.and_then(|(value,)| value))
    }
}

#[async_trait]
impl TemplateStore for PostgresStores {
    async fn email_body_for_subscription(
        &self,
        subscription_id: Uuid,
        process_status: &str,
    ) -> StoreResult<String> {
        self.check_open()?;

        let body: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT body
            FROM subscription_email_bodies
            WHERE subscription_id = $1 AND process_status = $2
            "#,
        )
        .bind(subscription_id)
        .bind(process_status)
        .fetch_optional(&self.pool)
        .await?;

        body.map(|(body,)| body).ok_or_else(|| {
            StoreError::NotFound(format!(
                "email body for subscription {} ({})",
                subscription_id, process_status
            ))
        })
    }

    async fn template_for_status(&self, status: &str) -> StoreResult<Option<EmailTemplate>> {
        self.check_open()?;

        let row: Option<(String, Option<String>, Option<String>, Option<String>, Option<String>)> =
            sqlx::query_as(
                r#"
                SELECT status, subject, template_body, cc, bcc
                FROM email_templates
                WHERE status = $1
                "#,
            )
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(status, subject, template_body, cc, bcc)| EmailTemplate {
            status,
            subject: subject.unwrap_or_default(),
            template_body: template_body.unwrap_or_default(),
            cc,
            bcc,
        }))
    }
}

#[async_trait]
impl EventStore for PostgresStores {
    async fn by_name(&self, name: &str) -> StoreResult<Event> {
        self.check_open()?;

        let row: Option<(i32, String)> = sqlx::query_as(
            r#"
            SELECT events_id, events_name
            FROM events
            WHERE events_name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(events_id, events_name)| Event {
            events_id,
            events_name,
        })
        .ok_or_else(|| StoreError::NotFound(format!("event {}", name)))
    }
}

#[async_trait]
impl PlanEventStore for PostgresStores {
    async fn plan_event(
        &self,
        plan_id: Uuid,
        event_id: i32,
    ) -> StoreResult<Option<PlanEventMapping>> {
        self.check_open()?;

        let row: Option<(Option<String>, Option<bool>)> = sqlx::query_as(
            r#"
            SELECT success_state_emails, copy_to_customer
            FROM plan_events_mapping
            WHERE plan_id = $1 AND event_id = $2
            "#,
        )
        .bind(plan_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(success_state_emails, copy_to_customer)| PlanEventMapping {
            plan_id,
            event_id,
            success_state_emails,
            copy_to_customer,
        }))
    }
}
