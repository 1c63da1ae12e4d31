//! Configuration keys read during content resolution.

pub const SMTP_FROM_EMAIL: &str = "SMTPFromEmail";
pub const SMTP_PASSWORD: &str = "SMTPPassword";
pub const SMTP_SSL_ENABLED: &str = "SMTPSslEnabled";
pub const SMTP_USER_NAME: &str = "SMTPUserName";
pub const SMTP_PORT: &str = "SMTPPort";
pub const SMTP_HOST: &str = "SMTPHost";

/// Recipients of scheduler reports
pub const SCHEDULER_EMAIL_TO: &str = "SchedulerEmailTo";

/// Process status that forces the failure template
pub const FAILURE_PROCESS_STATUS: &str = "failure";
/// Template status used for failed processes
pub const FAILED_TEMPLATE_STATUS: &str = "Failed";
