//! Subscription-event and scheduler-event content resolution.

use std::time::Instant;

use serde::Deserialize;
use uuid::Uuid;

use crate::config::{ContentConfig, TransportMode};
use crate::domain::{MessageDraft, MessageSpecification, TransportSettings};
use crate::error::{ContentError, ContentResult};
use crate::metrics::{ResolutionMetrics, StoreMetrics};
use crate::store::ContentStores;

use super::finalizer::ContentFinalizer;
use super::keys;
use super::substitution::{substitute_scheduler_tokens, SchedulerReplacements};

/// A subscription moved between lifecycle states.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionEventRequest {
    pub subscription_id: Uuid,
    pub plan_id: Uuid,
    /// Outcome of the operation (`success`, `failure`, ...)
    pub process_status: String,
    /// Plan event name (`Activate`, `Unsubscribe`, ...)
    pub event_name: String,
    pub subscription_status: String,
}

/// A scheduled task finished for a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerEventRequest {
    pub scheduler_task_name: String,
    pub subscription_name: String,
    pub subscription_status: String,
    pub response_json: String,
}

/// Resolves message specifications from the configured stores.
///
/// Holds no mutable state; one instance can serve concurrent resolutions.
pub struct ContentResolver {
    stores: ContentStores,
    finalizer: ContentFinalizer,
}

impl ContentResolver {
    /// Resolver that reads SMTP settings on every finalization.
    pub fn new(stores: ContentStores) -> Self {
        let finalizer = ContentFinalizer::per_resolution(stores.configuration.clone());
        Self { stores, finalizer }
    }

    /// Resolver that reuses transport settings loaded at startup.
    pub fn with_transport(stores: ContentStores, transport: TransportSettings) -> Self {
        let finalizer = ContentFinalizer::preloaded(stores.configuration.clone(), transport);
        Self { stores, finalizer }
    }

    /// Build a resolver in the transport mode chosen by configuration.
    pub async fn from_config(stores: ContentStores, config: &ContentConfig) -> ContentResult<Self> {
        match config.transport_mode {
            TransportMode::PerResolution => Ok(Self::new(stores)),
            TransportMode::Startup => {
                let transport = TransportSettings::load(stores.configuration.as_ref()).await?;
                tracing::info!(
                    host = %transport.host,
                    port = transport.port,
                    "SMTP settings loaded"
                );
                Ok(Self::with_transport(stores, transport))
            }
        }
    }

    /// Resolve the message for a subscription lifecycle event.
    #[tracing::instrument(
        name = "content.subscription_event",
        skip(self, request),
        fields(
            subscription_id = %request.subscription_id,
            event = %request.event_name,
            process_status = %request.process_status
        )
    )]
    pub async fn subscription_event(
        &self,
        request: &SubscriptionEventRequest,
    ) -> ContentResult<MessageSpecification> {
        let started = Instant::now();
        let result = self.resolve_subscription_event(request).await;
        ResolutionMetrics::record("subscription", started, &result);
        result
    }

    async fn resolve_subscription_event(
        &self,
        request: &SubscriptionEventRequest,
    ) -> ContentResult<MessageSpecification> {
        StoreMetrics::record_lookup("templates");
        let body = self
            .stores
            .templates
            .email_body_for_subscription(request.subscription_id, &request.process_status)
            .await?;

        StoreMetrics::record_lookup("events");
        let event = self.stores.events.by_name(&request.event_name).await?;

        let template_status = if request.process_status == keys::FAILURE_PROCESS_STATUS {
            keys::FAILED_TEMPLATE_STATUS
        } else {
            request.subscription_status.as_str()
        };
        StoreMetrics::record_lookup("templates");
        let template = self
            .stores
            .templates
            .template_for_status(template_status)
            .await?;

        StoreMetrics::record_lookup("plan_events");
        let mapping = self
            .stores
            .plan_events
            .plan_event(request.plan_id, event.events_id)
            .await?;

        let mut draft = MessageDraft {
            body,
            ..Default::default()
        };
        if let Some(mapping) = &mapping {
            draft.to = mapping.recipients().to_string();
            draft.copy_to_customer = mapping.copies_customer();
        }

        if draft.to.is_empty() {
            tracing::warn!(
                plan_id = %request.plan_id,
                event_id = event.events_id,
                mapping_found = mapping.is_some(),
                "No recipients configured for plan event"
            );
            return Err(ContentError::NoRecipients);
        }

        match &template {
            Some(template) => {
                // Only copy cc when there is a primary recipient.
                if !draft.to.is_empty() && !template.cc().is_empty() {
                    draft.cc = template.cc().to_string();
                }
                if !template.bcc().is_empty() {
                    draft.bcc = template.bcc().to_string();
                }
                draft.subject = template.subject.clone();
            }
            None => {
                tracing::debug!(status = %template_status, "No email template for status");
            }
        }

        self.finalizer.finalize(draft).await
    }

    /// Resolve the report sent after a scheduled task ran.
    #[tracing::instrument(
        name = "content.scheduler_event",
        skip(self, request),
        fields(
            task = %request.scheduler_task_name,
            subscription = %request.subscription_name
        )
    )]
    pub async fn scheduler_event(
        &self,
        request: &SchedulerEventRequest,
    ) -> ContentResult<MessageSpecification> {
        let started = Instant::now();
        let result = self.resolve_scheduler_event(request).await;
        ResolutionMetrics::record("scheduler", started, &result);
        result
    }

    async fn resolve_scheduler_event(
        &self,
        request: &SchedulerEventRequest,
    ) -> ContentResult<MessageSpecification> {
        StoreMetrics::record_lookup("templates");
        let template = self
            .stores
            .templates
            .template_for_status(&request.subscription_status)
            .await?;

        StoreMetrics::record_lookup("configuration");
        let to = self
            .stores
            .configuration
            .value_by_name(keys::SCHEDULER_EMAIL_TO)
            .await?
            .unwrap_or_default();

        if to.is_empty() {
            tracing::warn!(key = keys::SCHEDULER_EMAIL_TO, "No scheduler report recipients configured");
            return Err(ContentError::NoRecipients);
        }

        let template = template
            .ok_or_else(|| ContentError::TemplateNotFound(request.subscription_status.clone()))?;

        let body = substitute_scheduler_tokens(
            &template.template_body,
            SchedulerReplacements {
                subscription_name: &request.subscription_name,
                scheduler_task_name: &request.scheduler_task_name,
                response_json: &request.response_json,
            },
        );

        self.finalizer
            .finalize(MessageDraft {
                subject: template.subject,
                body,
                cc: String::new(),
                bcc: String::new(),
                to,
                copy_to_customer: false,
            })
            .await
    }

    /// Attach transport settings to an already resolved draft.
    pub async fn finalize(&self, draft: MessageDraft) -> ContentResult<MessageSpecification> {
        self.finalizer.finalize(draft).await
    }
}
