//! Literal token substitution for scheduler report bodies

/// Subscription name placeholder
pub const SUBSCRIPTION_NAME_TOKEN: &str = "****SubscriptionName****";
/// Scheduler task name placeholder
pub const SCHEDULER_TASK_NAME_TOKEN: &str = "****SchedulerTaskName****";
/// Scheduler result payload placeholder
pub const RESPONSE_JSON_TOKEN: &str = "****ResponseJson****";

/// Values substituted into a scheduler report template.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerReplacements<'a> {
    pub subscription_name: &'a str,
    pub scheduler_task_name: &'a str,
    pub response_json: &'a str,
}

/// Replace every occurrence of the three scheduler tokens in `template`.
///
/// Tokens missing from the template are ignored. Replacements run in order
/// (subscription name, task name, response JSON), so a value that itself contains
/// a later token is replaced again.
pub fn substitute_scheduler_tokens(template: &str, values: SchedulerReplacements<'_>) -> String {
    template
        .replace(SUBSCRIPTION_NAME_TOKEN, values.subscription_name)
        .replace(SCHEDULER_TASK_NAME_TOKEN, values.scheduler_task_name)
        .replace(RESPONSE_JSON_TOKEN, values.response_json)
}
