//! Typed plugin options resolved from the host's untyped config map.
//!
//! Resolution order for every string option: explicit non-empty value,
//! then (webhook only) the `SLACK_WEBHOOK_URL` environment variable,
//! then the built-in default. Empty strings count as absent. Booleans
//! override the default whenever present, including `false`.

use serde::Serialize;
use serde_json::Value;

use super::plugin::RawConfig;

/// Environment variable consulted when no webhook is configured
pub const WEBHOOK_ENV_VAR: &str = "SLACK_WEBHOOK_URL";

pub const DEFAULT_USERNAME: &str = "Relicta";
pub const DEFAULT_ICON_EMOJI: &str = ":rocket:";

/// Fully resolved plugin options for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackSettings {
    pub webhook_url: String,
    /// Empty means the webhook's default channel
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub icon_url: String,
    pub notify_on_success: bool,
    pub notify_on_error: bool,
    pub include_changelog: bool,
    pub mentions: Vec<String>,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            channel: String::new(),
            username: DEFAULT_USERNAME.to_string(),
            icon_emoji: DEFAULT_ICON_EMOJI.to_string(),
            icon_url: String::new(),
            notify_on_success: true,
            notify_on_error: true,
            include_changelog: false,
            mentions: Vec::new(),
        }
    }
}

impl SlackSettings {
    /// Resolves options using the process environment for fallbacks
    pub fn resolve(raw: &RawConfig) -> Self {
        Self::resolve_with_env(raw, |key| std::env::var(key).ok())
    }

    /// Resolves options with an explicit environment lookup
    pub fn resolve_with_env<F>(raw: &RawConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let webhook_url = string_option(raw, "webhook")
            .or_else(|| env(WEBHOOK_ENV_VAR).filter(|v| !v.is_empty()))
            .unwrap_or(defaults.webhook_url);

        Self {
            webhook_url,
            channel: string_option(raw, "channel").unwrap_or(defaults.channel),
            username: string_option(raw, "username").unwrap_or(defaults.username),
            icon_emoji: string_option(raw, "icon_emoji").unwrap_or(defaults.icon_emoji),
            icon_url: string_option(raw, "icon_url").unwrap_or(defaults.icon_url),
            notify_on_success: bool_option(raw, "notify_on_success")
                .unwrap_or(defaults.notify_on_success),
            notify_on_error: bool_option(raw, "notify_on_error")
                .unwrap_or(defaults.notify_on_error),
            include_changelog: bool_option(raw, "include_changelog")
                .unwrap_or(defaults.include_changelog),
            mentions: list_option(raw, "mentions").unwrap_or(defaults.mentions),
        }
    }
}

fn string_option(raw: &RawConfig, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn bool_option(raw: &RawConfig, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

fn list_option(raw: &RawConfig, key: &str) -> Option<Vec<String>> {
    let items = raw.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}
