//! Attaches SMTP transport settings to a message draft.
//!
//! Settings come from the configuration store in one of two ways:
//!
//! - per resolution: the six SMTP keys are read and parsed on every call, and a
//!   malformed value fails that resolution (`ParseBool` / `ParsePort`)
//! - preloaded: `TransportSettings::load` parses them once at startup and
//!   reports malformed values as `StartupValidation`

use std::sync::Arc;

use crate::domain::{parse_flag, MessageDraft, MessageSpecification, TransportSettings};
use crate::error::{ContentError, ContentResult};
use crate::metrics::StoreMetrics;
use crate::store::ConfigurationStore;

use super::keys;

enum TransportSource {
    PerResolution,
    Preloaded(TransportSettings),
}

pub struct ContentFinalizer {
    configuration: Arc<dyn ConfigurationStore>,
    source: TransportSource,
}

impl ContentFinalizer {
    /// Read transport settings from configuration on every finalization.
    pub fn per_resolution(configuration: Arc<dyn ConfigurationStore>) -> Self {
        Self {
            configuration,
            source: TransportSource::PerResolution,
        }
    }

    /// Reuse settings loaded once at startup.
    pub fn preloaded(configuration: Arc<dyn ConfigurationStore>, transport: TransportSettings) -> Self {
        Self {
            configuration,
            source: TransportSource::Preloaded(transport),
        }
    }

    pub fn is_preloaded(&self) -> bool {
        matches!(self.source, TransportSource::Preloaded(_))
    }

    /// Build the final message. Fails with `NoRecipients` when `draft.to` is empty.
    pub async fn finalize(&self, draft: MessageDraft) -> ContentResult<MessageSpecification> {
        if draft.to.is_empty() {
            tracing::warn!("Finalize requested without recipients");
            return Err(ContentError::NoRecipients);
        }

        let transport = match &self.source {
            TransportSource::Preloaded(transport) => transport.clone(),
            TransportSource::PerResolution => read_transport(self.configuration.as_ref()).await?,
        };

        Ok(MessageSpecification::from_draft(draft, transport))
    }
}

impl TransportSettings {
    /// Load and validate transport settings once.
    pub async fn load(configuration: &dyn ConfigurationStore) -> ContentResult<Self> {
        match read_transport(configuration).await {
            Err(e @ ContentError::ParseBool { .. }) | Err(e @ ContentError::ParsePort { .. }) => {
                tracing::error!(error = %e, "Invalid SMTP settings");
                Err(ContentError::StartupValidation(e.to_string()))
            }
            other => other,
        }
    }
}

async fn read_value(configuration: &dyn ConfigurationStore, key: &'static str) -> ContentResult<String> {
    StoreMetrics::record_lookup("configuration");
    Ok(configuration.value_by_name(key).await?.unwrap_or_default())
}

async fn read_transport(configuration: &dyn ConfigurationStore) -> ContentResult<TransportSettings> {
    let from_email = read_value(configuration, keys::SMTP_FROM_EMAIL).await?;
    let password = read_value(configuration, keys::SMTP_PASSWORD).await?;

    let ssl = read_value(configuration, keys::SMTP_SSL_ENABLED).await?;
    let ssl_enabled = parse_flag(&ssl).ok_or(ContentError::ParseBool {
        key: keys::SMTP_SSL_ENABLED,
        value: ssl.clone(),
    })?;

    let user_name = read_value(configuration, keys::SMTP_USER_NAME).await?;

    let port = read_value(configuration, keys::SMTP_PORT).await?;
    let port = port
        .trim()
        .parse::<u16>()
        .map_err(|source| ContentError::ParsePort {
            key: keys::SMTP_PORT,
            value: port.clone(),
            source,
        })?;

    let host = read_value(configuration, keys::SMTP_HOST).await?;

    Ok(TransportSettings {
        host,
        port,
        user_name,
        password,
        ssl_enabled,
        from_email,
    })
}
