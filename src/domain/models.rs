//! Read-only records owned by the external stores.

use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// An email template selected by subscription status (e.g. `Subscribed`, `Failed`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Status key the template is registered under
    pub status: String,

    pub subject: String,

    /// Body text, may contain `****Token****` placeholders
    pub template_body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
}

impl EmailTemplate {
    pub fn new(
        status: impl Into<String>,
        subject: impl Into<String>,
        template_body: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            subject: subject.into(),
            template_body: template_body.into(),
            cc: None,
            bcc: None,
        }
    }

    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    pub fn with_bcc(mut self, bcc: impl Into<String>) -> Self {
        self.bcc = Some(bcc.into());
        self
    }

    /// cc list, or `""` when unset
    pub fn cc(&self) -> &str {
        self.cc.as_deref().unwrap_or_default()
    }

    /// bcc list, or `""` when unset
    pub fn bcc(&self) -> &str {
        self.bcc.as_deref().unwrap_or_default()
    }
}

/// A named lifecycle event (e.g. `Activate`, `Unsubscribe`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub events_id: i32,
    pub events_name: String,
}

impl Event {
    pub fn new(events_id: i32, events_name: impl Into<String>) -> Self {
        Self {
            events_id,
            events_name: events_name.into(),
        }
    }
}

/// Recipients configured for one (plan, event) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEventMapping {
    pub plan_id: Uuid,
    pub event_id: i32,

    /// Comma/semicolon separated addresses notified on success
    #[serde(default)]
    pub success_state_emails: Option<String>,

    /// Whether the subscribing customer is copied; null means no.
    /// Sources that store the flag as text are parsed with [`parse_flag`].
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub copy_to_customer: Option<bool>,
}

impl PlanEventMapping {
    pub fn new(plan_id: Uuid, event_id: i32, success_state_emails: impl Into<String>) -> Self {
        Self {
            plan_id,
            event_id,
            success_state_emails: Some(success_state_emails.into()),
            copy_to_customer: None,
        }
    }

    pub fn with_copy_to_customer(mut self, copy: Option<bool>) -> Self {
        self.copy_to_customer = copy;
        self
    }

    pub fn recipients(&self) -> &str {
        self.success_state_emails.as_deref().unwrap_or_default()
    }

    pub fn copies_customer(&self) -> bool {
        self.copy_to_customer.unwrap_or(false)
    }
}

/// Parse a stored boolean flag.
///
/// Accepts `true`/`false` in any letter case, ignoring surrounding whitespace.
pub fn parse_flag(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFlag::Bool(flag)) => Ok(Some(flag)),
        Some(RawFlag::Text(text)) => parse_flag(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid boolean flag: {:?}", text))),
    }
}
