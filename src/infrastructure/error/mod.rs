use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised by the read-only accessors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Backend is temporarily unavailable (e.g., pool closed)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised while resolving notification content.
#[derive(Error, Debug)]
pub enum ContentError {
    /// No `to` recipients could be determined; the notification must not be sent.
    #[error("Error while sending an email: no recipients. Please check the configuration.")]
    NoRecipients,

    #[error("Invalid boolean for {key}: {value:?}")]
    ParseBool { key: &'static str, value: String },

    #[error("Invalid port for {key}: {value:?}")]
    ParsePort {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Transport settings could not be loaded once at startup.
    #[error("Transport settings failed validation: {0}")]
    StartupValidation(String),

    #[error("No email template for status: {0}")]
    TemplateNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContentError {
    /// Short label used for metrics and log fields.
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::NoRecipients => "no_recipients",
            ContentError::ParseBool { .. } | ContentError::ParsePort { .. } => "parse",
            ContentError::StartupValidation(_) => "startup_validation",
            ContentError::TemplateNotFound(_) => "template_not_found",
            ContentError::Store(_) => "store",
        }
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
