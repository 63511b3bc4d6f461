use std::env;
use std::time::Duration;

use crate::services::notification::WebhookRules;

/// Host process configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub slack: SlackHttpConfig,
}

/// Outbound Slack delivery configuration
#[derive(Debug, Clone)]
pub struct SlackHttpConfig {
    /// Upper bound for a single webhook request
    pub timeout: Duration,
    /// Host every webhook URL must point at
    pub webhook_host: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            slack: SlackHttpConfig::from_env()?,
        })
    }
}

impl SlackHttpConfig {
    /// Load Slack delivery configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let webhook_host = env::var("SLACK_WEBHOOK_HOST")
            .unwrap_or_else(|_| WebhookRules::SLACK_HOST.to_string());

        if webhook_host.trim().is_empty() {
            return Err(ConfigError::EmptyWebhookHost);
        }

        Ok(Self {
            timeout: Duration::from_secs(
                env::var("SLACK_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            ),
            webhook_host,
        })
    }

    /// Webhook rules enforced for this deployment
    pub fn webhook_rules(&self) -> WebhookRules {
        WebhookRules {
            host: self.webhook_host.clone(),
            ..WebhookRules::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    EmptyWebhookHost,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::EmptyWebhookHost => {
                write!(f, "SLACK_WEBHOOK_HOST must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
