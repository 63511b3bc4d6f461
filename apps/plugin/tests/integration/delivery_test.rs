//! Integration tests for webhook delivery
//!
//! Exercises the reqwest-backed client against a local mock webhook.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use relicta_slack::error::SendError;
use relicta_slack::models::{ExecuteRequest, Hook, SlackMessage};
use relicta_slack::services::notification::slack::DEFAULT_TIMEOUT;
use relicta_slack::services::{MessageSender, SlackClient, SlackPlugin};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::common::{config, MockSlack, ReleaseContextBuilder};

fn client() -> SlackClient {
    SlackClient::new(DEFAULT_TIMEOUT).expect("Failed to create Slack client")
}

fn test_message() -> SlackMessage {
    SlackMessage {
        channel: "#test".to_string(),
        username: "TestBot".to_string(),
        text: "Test message".to_string(),
        ..Default::default()
    }
}

// =============================================================================
// SlackClient
// =============================================================================

#[actix_web::test]
async fn test_send_posts_json() {
    let mock = MockSlack::start(StatusCode::OK);

    client()
        .send(&mock.webhook_url(), &test_message(), &CancellationToken::new())
        .await
        .expect("delivery should succeed");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/services/T00000000/B00000000/XXXX");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(requests[0].body["channel"], "#test");
    assert_eq!(requests[0].body["username"], "TestBot");
    assert_eq!(requests[0].body["text"], "Test message");
}

#[actix_web::test]
async fn test_send_reports_non_success_status() {
    let mock = MockSlack::start(StatusCode::INTERNAL_SERVER_ERROR);

    let err = client()
        .send(&mock.webhook_url(), &test_message(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("status 500"));
    // Exactly one attempt, no retry
    assert_eq!(mock.requests().len(), 1);
}

#[actix_web::test]
async fn test_send_accepts_any_2xx() {
    let mock = MockSlack::start(StatusCode::NO_CONTENT);

    let result = client()
        .send(&mock.webhook_url(), &test_message(), &CancellationToken::new())
        .await;

    assert!(result.is_ok());
}

#[actix_web::test]
async fn test_send_times_out() {
    let mock = MockSlack::start_with_delay(StatusCode::OK, Duration::from_secs(2));
    let client = SlackClient::new(Duration::from_millis(200)).unwrap();

    let err = client
        .send(&mock.webhook_url(), &test_message(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SendError::Timeout), "got {:?}", err);
}

#[actix_web::test]
async fn test_send_cancelled_in_flight() {
    let mock = MockSlack::start_with_delay(StatusCode::OK, Duration::from_secs(2));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    actix_web::rt::spawn(async move {
        actix_web::rt::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = client()
        .send(&mock.webhook_url(), &test_message(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, SendError::Cancelled), "got {:?}", err);
}

#[actix_web::test]
async fn test_send_connection_refused() {
    // Bind then drop a listener to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/services/T/B/X", port);

    let err = client()
        .send(&url, &test_message(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.status().is_none());
    assert!(
        matches!(err, SendError::Connect(_) | SendError::Request(_)),
        "got {:?}",
        err
    );
}

// =============================================================================
// Execute Against Mock Webhook
// =============================================================================

fn plugin_for(mock: &MockSlack) -> SlackPlugin {
    SlackPlugin::with_rules(Arc::new(client()), mock.rules())
}

fn live_request(hook: Hook, mock: &MockSlack) -> ExecuteRequest {
    ExecuteRequest {
        hook,
        config: config(json!({"webhook": mock.webhook_url(), "channel": "#releases"})),
        context: ReleaseContextBuilder::new().build(),
        dry_run: false,
    }
}

#[actix_web::test]
async fn test_execute_success_http_ok() {
    let mock = MockSlack::start(StatusCode::OK);

    let resp = plugin_for(&mock)
        .execute(live_request(Hook::PostPublish, &mock))
        .await;

    assert!(resp.success, "unexpected failure: {}", resp.error);
    assert!(resp.message.contains("Sent Slack success notification"));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body["channel"], "#releases");
    assert_eq!(requests[0].body["username"], "Relicta");
    assert_eq!(requests[0].body["attachments"][0]["color"], "good");
}

#[actix_web::test]
async fn test_execute_success_http_error() {
    let mock = MockSlack::start(StatusCode::BAD_REQUEST);

    let resp = plugin_for(&mock)
        .execute(live_request(Hook::PostPublish, &mock))
        .await;

    assert!(!resp.success);
    assert!(resp.error.contains("failed to send Slack message"));
    assert!(resp.error.contains("status 400"));
}

#[actix_web::test]
async fn test_execute_error_http_ok() {
    let mock = MockSlack::start(StatusCode::OK);

    let resp = plugin_for(&mock)
        .execute(live_request(Hook::OnError, &mock))
        .await;

    assert!(resp.success);
    assert!(resp.message.contains("Sent Slack error notification"));
    assert_eq!(mock.requests()[0].body["attachments"][0]["color"], "danger");
}

#[actix_web::test]
async fn test_execute_error_http_unavailable() {
    let mock = MockSlack::start(StatusCode::SERVICE_UNAVAILABLE);

    let resp = plugin_for(&mock)
        .execute(live_request(Hook::OnError, &mock))
        .await;

    assert!(!resp.success);
    assert!(resp.error.contains("status 503"));
}

#[actix_web::test]
async fn test_execute_server_error_500() {
    let mock = MockSlack::start(StatusCode::INTERNAL_SERVER_ERROR);

    let resp = plugin_for(&mock)
        .execute(live_request(Hook::OnSuccess, &mock))
        .await;

    assert!(!resp.success);
    assert!(resp.error.contains("status 500"));
}

#[actix_web::test]
async fn test_execute_dry_run_never_contacts_webhook() {
    let mock = MockSlack::start(StatusCode::OK);
    let mut request = live_request(Hook::PostPublish, &mock);
    request.dry_run = true;

    let resp = plugin_for(&mock).execute(request).await;

    assert!(resp.success);
    assert!(resp.message.contains("Would send Slack success notification"));
    assert!(mock.requests().is_empty());
}

#[actix_web::test]
async fn test_default_rules_reject_mock_url() {
    let mock = MockSlack::start(StatusCode::OK);
    let plugin = SlackPlugin::new(Arc::new(client()));

    let resp = plugin.execute(live_request(Hook::PostPublish, &mock)).await;

    assert!(!resp.success);
    assert!(resp.error.contains("must use HTTPS"));
    assert!(mock.requests().is_empty());
}
