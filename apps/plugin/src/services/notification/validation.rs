//! Webhook destination checks.

use crate::models::ValidationError;

/// Config key the webhook URL is read from
pub const WEBHOOK_FIELD: &str = "webhook";

/// Shape every webhook URL must have
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRules {
    pub scheme: String,
    pub host: String,
    pub path_prefix: String,
}

impl WebhookRules {
    pub const SLACK_HOST: &'static str = "hooks.slack.com";
    pub const SLACK_PATH_PREFIX: &'static str = "/services/";
}

impl Default for WebhookRules {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: Self::SLACK_HOST.to_string(),
            path_prefix: Self::SLACK_PATH_PREFIX.to_string(),
        }
    }
}

/// Validates a webhook URL against the default Slack rules
pub fn validate_webhook_url(raw: &str) -> Result<(), ValidationError> {
    validate_webhook_url_with(raw, &WebhookRules::default())
}

/// Validates a webhook URL against explicit rules.
///
/// Checks run in order and stop at the first failure: presence, absolute
/// URL syntax, scheme, exact host, path prefix.
pub fn validate_webhook_url_with(raw: &str, rules: &WebhookRules) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::required(
            WEBHOOK_FIELD,
            "webhook URL is required",
        ));
    }

    let parsed = url::Url::parse(raw)
        .map_err(|e| ValidationError::format(WEBHOOK_FIELD, format!("invalid URL: {}", e)))?;

    if parsed.scheme() != rules.scheme {
        return Err(ValidationError::format(
            WEBHOOK_FIELD,
            format!("webhook URL must use {}", rules.scheme.to_uppercase()),
        ));
    }

    // Exact match, so hooks.slack.com.evil.com is rejected
    if parsed.host_str() != Some(rules.host.as_str()) {
        return Err(ValidationError::format(
            WEBHOOK_FIELD,
            format!("webhook URL must be on {}", rules.host),
        ));
    }

    if !parsed.path().starts_with(&rules.path_prefix) {
        return Err(ValidationError::format(
            WEBHOOK_FIELD,
            format!("webhook URL path must start with {}", rules.path_prefix),
        ));
    }

    Ok(())
}
