//! Cross-component integration tests
//!
//! These tests drive both resolvers through the public API against the memory
//! store, without requiring PostgreSQL.

use std::sync::Arc;

use uuid::Uuid;

use subscription_notifier::config::{ContentConfig, LogConfig, StoreConfig, TransportMode};
use subscription_notifier::content::keys;
use subscription_notifier::content::{
    ContentResolver, SchedulerEventRequest, SubscriptionEventRequest,
};
use subscription_notifier::domain::{EmailTemplate, Event, MessageDraft, PlanEventMapping};
use subscription_notifier::error::ContentError;
use subscription_notifier::metrics::encode_metrics;
use subscription_notifier::store::{create_stores, ContentStores, MemoryStore};
use subscription_notifier::telemetry::init_tracing;

const ACTIVATE: i32 = 1;
const UNSUBSCRIBE: i32 = 2;

struct TestEnvironment {
    subscription_id: Uuid,
    plan_id: Uuid,
    resolver: ContentResolver,
}

/// Create a portal-like environment with two events and one mapped plan
async fn create_test_environment(mode: TransportMode) -> TestEnvironment {
    let _ = init_tracing(&LogConfig::default());

    let subscription_id = Uuid::new_v4();
    let plan_id = Uuid::new_v4();

    let store = MemoryStore::new()
        .with_config(keys::SMTP_FROM_EMAIL, "noreply@contoso.com")
        .with_config(keys::SMTP_PASSWORD, "hunter2")
        .with_config(keys::SMTP_SSL_ENABLED, "true")
        .with_config(keys::SMTP_USER_NAME, "mailer")
        .with_config(keys::SMTP_PORT, "587")
        .with_config(keys::SMTP_HOST, "smtp.contoso.com")
        .with_config(keys::SCHEDULER_EMAIL_TO, "reports@contoso.com")
        .with_event(Event::new(ACTIVATE, "Activate"))
        .with_event(Event::new(UNSUBSCRIBE, "Unsubscribe"))
        .with_body(subscription_id, "success", "Subscription activated")
        .with_body(subscription_id, "failure", "Subscription could not be activated")
        .with_template(
            EmailTemplate::new("Subscribed", "Welcome", "unused").with_cc("sales@contoso.com"),
        )
        .with_template(
            EmailTemplate::new("Failed", "Activation failed", "unused")
                .with_bcc("oncall@contoso.com"),
        )
        .with_template(EmailTemplate::new(
            "Accepted",
            "Meter report",
            "****SchedulerTaskName**** / ****SubscriptionName****: ****ResponseJson****",
        ))
        .with_plan_event(
            PlanEventMapping::new(plan_id, ACTIVATE, "ops@contoso.com;billing@contoso.com")
                .with_copy_to_customer(Some(true)),
        );

    let stores = ContentStores::from_backend(Arc::new(store));
    let resolver = ContentResolver::from_config(
        stores,
        &ContentConfig {
            transport_mode: mode,
        },
    )
    .await
    .unwrap();

    TestEnvironment {
        subscription_id,
        plan_id,
        resolver,
    }
}

impl TestEnvironment {
    fn lifecycle(&self, process_status: &str, event_name: &str) -> SubscriptionEventRequest {
        SubscriptionEventRequest {
            subscription_id: self.subscription_id,
            plan_id: self.plan_id,
            process_status: process_status.to_string(),
            event_name: event_name.to_string(),
            subscription_status: "Subscribed".to_string(),
        }
    }
}

// =============================================================================
// Subscription Event Tests
// =============================================================================

#[tokio::test]
async fn test_activation_uses_mapping_recipients() {
    let env = create_test_environment(TransportMode::PerResolution).await;

    let message = env
        .resolver
        .subscription_event(&env.lifecycle("success", "Activate"))
        .await
        .unwrap();

    assert_eq!(message.to_emails, "ops@contoso.com;billing@contoso.com");
    assert!(message.copy_to_customer);
    assert!(!message.is_active);
    assert_eq!(message.transport.from_email, "noreply@contoso.com");
}

#[tokio::test]
async fn test_failure_ignores_subscription_status() {
    let env = create_test_environment(TransportMode::Startup).await;

    let message = env
        .resolver
        .subscription_event(&env.lifecycle("failure", "Activate"))
        .await
        .unwrap();

    assert_eq!(message.subject, "Activation failed");
    assert_eq!(message.body, "Subscription could not be activated");
    assert_eq!(message.cc_emails, "");
    assert_eq!(message.bcc_emails, "oncall@contoso.com");
}

#[tokio::test]
async fn test_unmapped_event_has_no_recipients() {
    let env = create_test_environment(TransportMode::PerResolution).await;

    let result = env
        .resolver
        .subscription_event(&env.lifecycle("success", "Unsubscribe"))
        .await;

    assert!(matches!(result, Err(ContentError::NoRecipients)));
}

// =============================================================================
// Scheduler Event Tests
// =============================================================================

#[tokio::test]
async fn test_scheduler_report() {
    let env = create_test_environment(TransportMode::Startup).await;

    let message = env
        .resolver
        .scheduler_event(&SchedulerEventRequest {
            scheduler_task_name: "DailyUsageCheck".to_string(),
            subscription_name: "Acme-Basic".to_string(),
            subscription_status: "Accepted".to_string(),
            response_json: r#"{"ok":true}"#.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(message.subject, "Meter report");
    assert_eq!(message.body, r#"DailyUsageCheck / Acme-Basic: {"ok":true}"#);
    assert_eq!(message.to_emails, "reports@contoso.com");
    assert!(!message.copy_to_customer);
}

#[tokio::test]
async fn test_requests_deserialize_from_trigger_payloads() {
    let env = create_test_environment(TransportMode::PerResolution).await;

    let payload = serde_json::json!({
        "subscription_id": env.subscription_id,
        "plan_id": env.plan_id,
        "process_status": "success",
        "event_name": "Activate",
        "subscription_status": "Subscribed"
    });
    let request: SubscriptionEventRequest = serde_json::from_value(payload).unwrap();

    let message = env.resolver.subscription_event(&request).await.unwrap();
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["to_emails"], "ops@contoso.com;billing@contoso.com");
    assert_eq!(json["transport"]["ssl_enabled"], true);
}

// =============================================================================
// Wiring Tests
// =============================================================================

#[test]
fn test_factory_memory_backend_reports_no_recipients() {
    let stores = create_stores(
        &StoreConfig {
            backend: "memory".to_string(),
        },
        None,
    );
    let resolver = ContentResolver::new(stores);

    let result = tokio_test::block_on(resolver.scheduler_event(&SchedulerEventRequest {
        scheduler_task_name: "DailyUsageCheck".to_string(),
        subscription_name: "Acme-Basic".to_string(),
        subscription_status: "Accepted".to_string(),
        response_json: "{}".to_string(),
    }));

    assert!(matches!(result, Err(ContentError::NoRecipients)));
}

#[tokio::test]
async fn test_finalize_without_recipients_fails() {
    let env = create_test_environment(TransportMode::Startup).await;

    let result = env
        .resolver
        .finalize(MessageDraft {
            subject: "Manual".to_string(),
            body: "No one to send to".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ContentError::NoRecipients)));
}

#[tokio::test]
async fn test_metrics_record_resolutions() {
    let env = create_test_environment(TransportMode::PerResolution).await;
    env.resolver
        .subscription_event(&env.lifecycle("success", "Activate"))
        .await
        .unwrap();

    let text = encode_metrics().unwrap();
    assert!(text.contains("notifier_resolutions_total"));
    assert!(text.contains("notifier_resolution_duration_seconds"));
}
