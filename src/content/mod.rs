//! Notification content resolution.
//!
//! Two entry points share one finalization step:
//!
//! - `ContentResolver::subscription_event`: lifecycle notifications. Recipients come
//!   from the plan-event mapping; the template is chosen by subscription status,
//!   except that failed processes always use the `Failed` template.
//! - `ContentResolver::scheduler_event`: scheduler reports. Recipients come from the
//!   `SchedulerEmailTo` configuration key and the body gets `****Token****`
//!   substitution.
//! - `ContentFinalizer`: attaches SMTP transport settings.
//!
//! Both resolvers fail with `ContentError::NoRecipients` before finalization when no
//! `to` address could be determined.
//!
//! # Example
//!
//! ```ignore
//! let stores = ContentStores::from_backend(Arc::new(store));
//! let resolver = ContentResolver::new(stores);
//!
//! let message = resolver
//!     .scheduler_event(&SchedulerEventRequest {
//!         scheduler_task_name: "DailyUsageCheck".to_string(),
//!         subscription_name: "Acme-Basic".to_string(),
//!         subscription_status: "Accepted".to_string(),
//!         response_json: r#"{"ok":true}"#.to_string(),
//!     })
//!     .await?;
//! ```

mod finalizer;
pub mod keys;
mod resolver;
mod substitution;

pub use finalizer::ContentFinalizer;
pub use resolver::{ContentResolver, SchedulerEventRequest, SubscriptionEventRequest};
pub use substitution::{
    substitute_scheduler_tokens, SchedulerReplacements, RESPONSE_JSON_TOKEN,
    SCHEDULER_TASK_NAME_TOKEN, SUBSCRIPTION_NAME_TOKEN,
};
