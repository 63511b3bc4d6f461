//! Slack incoming-webhook client.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::MessageSender;
use crate::error::{AppError, AppResult, SendError};
use crate::models::SlackMessage;

/// Default upper bound for one webhook request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP delivery to Slack webhooks over a shared connection pool
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: reqwest::Client,
}

impl SlackClient {
    /// Creates a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn post(&self, url: url::Url, body: Vec<u8>) -> Result<(), SendError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SendError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl MessageSender for SlackClient {
    async fn send(
        &self,
        webhook_url: &str,
        message: &SlackMessage,
        cancel: &CancellationToken,
    ) -> Result<(), SendError> {
        let url = url::Url::parse(webhook_url)?;
        let body = serde_json::to_vec(message)?;

        log::debug!(
            "Posting Slack message to {} ({} bytes)",
            url.host_str().unwrap_or("unknown host"),
            body.len()
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SendError::Cancelled),
            result = self.post(url, body) => result,
        }
    }
}
