//! Slack release-notification plugin.
//!
//! Exposes the three operations the host release tool calls:
//! - `describe` - static metadata and config schema
//! - `validate` - structured config errors, no side effects
//! - `execute` - hook dispatch, message building and delivery

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::models::{
    ExecuteRequest, ExecuteResponse, Hook, PluginInfo, RawConfig, ReleaseContext, SlackMessage,
    SlackSettings, ValidateResponse, ValidationError,
};
use crate::services::notification::validation::WEBHOOK_FIELD;
use crate::services::notification::{
    build_error_message, build_success_message, validate_webhook_url_with, MessageSender,
    WebhookRules,
};

pub const PLUGIN_NAME: &str = "slack";
pub const PLUGIN_DESCRIPTION: &str = "Send Slack notifications for releases";
pub const PLUGIN_AUTHOR: &str = "Relicta Team";

/// Which notification a hook maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    fn for_hook(hook: &Hook) -> Option<Self> {
        match hook {
            Hook::PostPublish | Hook::OnSuccess => Some(NotificationKind::Success),
            Hook::OnError => Some(NotificationKind::Error),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    fn enabled(&self, settings: &SlackSettings) -> bool {
        match self {
            NotificationKind::Success => settings.notify_on_success,
            NotificationKind::Error => settings.notify_on_error,
        }
    }

    fn disabled_message(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Success notification disabled",
            NotificationKind::Error => "Error notification disabled",
        }
    }

    fn build(&self, settings: &SlackSettings, ctx: &ReleaseContext) -> SlackMessage {
        match self {
            NotificationKind::Success => build_success_message(settings, ctx),
            NotificationKind::Error => build_error_message(settings, ctx),
        }
    }
}

/// The Slack plugin, holding the shared delivery client
#[derive(Clone)]
pub struct SlackPlugin {
    sender: Arc<dyn MessageSender>,
    rules: WebhookRules,
}

impl SlackPlugin {
    /// Creates a plugin enforcing the default Slack webhook rules
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self::with_rules(sender, WebhookRules::default())
    }

    pub fn with_rules(sender: Arc<dyn MessageSender>, rules: WebhookRules) -> Self {
        Self { sender, rules }
    }

    /// Static plugin metadata
    pub fn describe(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: PLUGIN_DESCRIPTION.to_string(),
            author: PLUGIN_AUTHOR.to_string(),
            hooks: vec![Hook::PostPublish, Hook::OnSuccess, Hook::OnError],
            config_schema: config_schema(&self.rules).to_string(),
        }
    }

    /// Validates a raw config map without touching the network
    pub fn validate(&self, raw: &RawConfig) -> ValidateResponse {
        let settings = SlackSettings::resolve(raw);
        let errors = self.check_settings(&settings).err().into_iter().collect();
        ValidateResponse::from_errors(errors)
    }

    /// Runs one hook with a fresh, never-cancelled token
    pub async fn execute(&self, request: ExecuteRequest) -> ExecuteResponse {
        self.execute_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Runs one hook; cancelling `cancel` aborts an in-flight delivery
    pub async fn execute_with_cancel(
        &self,
        request: ExecuteRequest,
        cancel: &CancellationToken,
    ) -> ExecuteResponse {
        let settings = SlackSettings::resolve(&request.config);

        let Some(kind) = NotificationKind::for_hook(&request.hook) else {
            log::debug!("Hook {} not handled by Slack plugin", request.hook);
            return ExecuteResponse::success(format!(
                "Hook {} not handled by Slack plugin",
                request.hook
            ));
        };

        if let Err(e) = self.check_settings(&settings) {
            log::warn!("Slack plugin configuration rejected: {}", e);
            return ExecuteResponse::failure("Invalid Slack configuration", e.message);
        }

        if !kind.enabled(&settings) {
            return ExecuteResponse::success(kind.disabled_message());
        }

        let message = kind.build(&settings, &request.context);
        let mut outputs = HashMap::new();
        outputs.insert("notification".to_string(), json!(kind.as_str()));
        outputs.insert("channel".to_string(), json!(settings.channel));
        outputs.insert("version".to_string(), json!(request.context.version));

        if request.dry_run {
            log::debug!(
                "Dry run: skipping Slack {} notification for {}",
                kind.as_str(),
                request.context.version
            );
            // Preview is best-effort
            if let Ok(payload) = serde_json::to_value(&message) {
                outputs.insert("payload".to_string(), payload);
            }
            return ExecuteResponse::success(format!(
                "Would send Slack {} notification to {}",
                kind.as_str(),
                channel_label(&settings)
            ))
            .with_outputs(outputs);
        }

        match self
            .sender
            .send(&settings.webhook_url, &message, cancel)
            .await
        {
            Ok(()) => {
                log::info!(
                    "Sent Slack {} notification for {} to {}",
                    kind.as_str(),
                    request.context.version,
                    channel_label(&settings)
                );
                ExecuteResponse::success(format!(
                    "Sent Slack {} notification to {}",
                    kind.as_str(),
                    channel_label(&settings)
                ))
                .with_outputs(outputs)
            }
            Err(e) => {
                log::warn!("Slack {} notification failed: {}", kind.as_str(), e);
                let error = format!("failed to send Slack message: {}", e);
                ExecuteResponse::failure(error.clone(), error).with_outputs(outputs)
            }
        }
    }

    fn check_settings(&self, settings: &SlackSettings) -> Result<(), ValidationError> {
        if settings.webhook_url.is_empty() {
            return Err(ValidationError::required(
                WEBHOOK_FIELD,
                "Slack webhook URL is required",
            ));
        }
        validate_webhook_url_with(&settings.webhook_url, &self.rules)
    }
}

fn channel_label(settings: &SlackSettings) -> &str {
    if settings.channel.is_empty() {
        "default channel"
    } else {
        &settings.channel
    }
}

/// JSON Schema for the accepted options; the webhook pattern follows `rules`
pub fn config_schema(rules: &WebhookRules) -> serde_json::Value {
    let webhook_pattern = format!(
        "^{}://{}{}",
        rules.scheme,
        rules.host.replace('.', "\\."),
        rules.path_prefix
    );

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "webhook": {
                "type": "string",
                "description": "Slack incoming webhook URL (or SLACK_WEBHOOK_URL)",
                "pattern": webhook_pattern
            },
            "channel": {
                "type": "string",
                "description": "Channel override, e.g. #releases"
            },
            "username": {
                "type": "string",
                "description": "Bot display name",
                "default": "Relicta"
            },
            "icon_emoji": {
                "type": "string",
                "description": "Bot icon emoji",
                "default": ":rocket:"
            },
            "icon_url": {
                "type": "string",
                "description": "Bot icon image URL, preferred over icon_emoji"
            },
            "notify_on_success": {
                "type": "boolean",
                "description": "Notify when a release is published",
                "default": true
            },
            "notify_on_error": {
                "type": "boolean",
                "description": "Notify when a release fails",
                "default": true
            },
            "include_changelog": {
                "type": "boolean",
                "description": "Include release notes in success notifications",
                "default": false
            },
            "mentions": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Users or groups to mention (U123, @U123, <!subteam^S123>)"
            }
        }
    })
}
