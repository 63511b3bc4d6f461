//! Slack notification pipeline.
//!
//! Validation and formatting are pure; delivery goes through the
//! [`MessageSender`] trait so the HTTP client can be swapped in tests.

pub mod format;
pub mod slack;
pub mod validation;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SendError;
use crate::models::SlackMessage;

pub use format::{build_error_message, build_success_message, format_mentions};
pub use slack::SlackClient;
pub use validation::{validate_webhook_url, validate_webhook_url_with, WebhookRules};

// =============================================================================
// Message Sender Trait
// =============================================================================

/// Delivers a single message to a webhook URL.
///
/// Implementations make at most one attempt; retries belong to the caller.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(
        &self,
        webhook_url: &str,
        message: &SlackMessage,
        cancel: &CancellationToken,
    ) -> Result<(), SendError>;
}
