//! The message specification handed to the mail transport.

use std::fmt;

use serde::Serialize;

/// SMTP settings attached to every message.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TransportSettings {
    pub host: String,
    pub port: u16,
    pub user_name: String,
    pub password: String,
    pub ssl_enabled: bool,
    pub from_email: String,
}

impl fmt::Debug for TransportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("ssl_enabled", &self.ssl_enabled)
            .field("from_email", &self.from_email)
            .finish()
    }
}

/// Subject, body and recipients before transport settings are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDraft {
    pub subject: String,
    pub body: String,
    pub cc: String,
    pub bcc: String,
    pub to: String,
    pub copy_to_customer: bool,
}

/// A fully populated notification message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSpecification {
    pub subject: String,
    pub body: String,
    pub to_emails: String,
    pub cc_emails: String,
    pub bcc_emails: String,
    pub copy_to_customer: bool,
    /// Always `false` here; activation is decided by the transport.
    pub is_active: bool,
    pub transport: TransportSettings,
}

impl MessageSpecification {
    pub fn from_draft(draft: MessageDraft, transport: TransportSettings) -> Self {
        Self {
            subject: draft.subject,
            body: draft.body,
            to_emails: draft.to,
            cc_emails: draft.cc,
            bcc_emails: draft.bcc,
            copy_to_customer: draft.copy_to_customer,
            is_active: false,
            transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> TransportSettings {
        TransportSettings {
            host: "smtp.contoso.com".to_string(),
            port: 587,
            user_name: "mailer".to_string(),
            password: "hunter2".to_string(),
            ssl_enabled: true,
            from_email: "noreply@contoso.com".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let output = format!("{:?}", transport());
        assert!(!output.contains("hunter2"));
        assert!(output.contains("[REDACTED]"));
        assert!(output.contains("smtp.contoso.com"));
    }

    #[test]
    fn test_from_draft_is_inactive() {
        let draft = MessageDraft {
            subject: "Subscribed".to_string(),
            body: "Welcome".to_string(),
            to: "ops@contoso.com".to_string(),
            copy_to_customer: true,
            ..Default::default()
        };

        let message = MessageSpecification::from_draft(draft, transport());
        assert!(!message.is_active);
        assert!(message.copy_to_customer);
        assert_eq!(message.to_emails, "ops@contoso.com");
        assert_eq!(message.cc_emails, "");
    }

    #[test]
    fn test_serializes_for_transport() {
        let message = MessageSpecification::from_draft(MessageDraft::default(), transport());
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["is_active"], false);
        assert_eq!(json["transport"]["port"], 587);
    }
}
