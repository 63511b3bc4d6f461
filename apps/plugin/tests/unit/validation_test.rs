//! Unit tests for webhook URL validation
//!
//! Tests the low-level validator and the plugin-level validate API.

use proptest::prelude::*;
use relicta_slack::models::{ValidationCode, WEBHOOK_ENV_VAR};
use relicta_slack::services::notification::validate_webhook_url;
use relicta_slack::services::SlackPlugin;
use rstest::rstest;
use serde_json::json;
use serial_test::serial;

use crate::common::{config, RecordingSender};

fn plugin() -> SlackPlugin {
    SlackPlugin::new(RecordingSender::new())
}

// =============================================================================
// Low-level Validator
// =============================================================================

#[rstest]
#[case::empty("", ValidationCode::Required, "webhook URL is required")]
#[case::no_scheme("not-a-url", ValidationCode::Format, "invalid URL")]
#[case::malformed("://malformed", ValidationCode::Format, "invalid URL")]
#[case::http(
    "http://hooks.slack.com/services/T00/B00/XXX",
    ValidationCode::Format,
    "must use HTTPS"
)]
#[case::wrong_host(
    "https://evil.com/services/T00/B00/XXX",
    ValidationCode::Format,
    "must be on hooks.slack.com"
)]
#[case::subdomain_bypass(
    "https://hooks.slack.com.evil.com/services/T00/B00/XXX",
    ValidationCode::Format,
    "must be on hooks.slack.com"
)]
#[case::wrong_path(
    "https://hooks.slack.com/api/T00/B00/XXX",
    ValidationCode::Format,
    "must start with /services/"
)]
fn test_validate_webhook_url_rejects(
    #[case] url: &str,
    #[case] code: ValidationCode,
    #[case] message: &str,
) {
    let err = validate_webhook_url(url).unwrap_err();

    assert_eq!(err.code, code);
    assert_eq!(err.field, "webhook");
    assert!(
        err.message.contains(message),
        "expected {:?} to contain {:?}",
        err.message,
        message
    );
}

#[test]
fn test_validate_webhook_url_accepts_slack_url() {
    assert!(
        validate_webhook_url("https://hooks.slack.com/services/T00000000/B00000000/XXXXXXXX")
            .is_ok()
    );
}

// =============================================================================
// Plugin validate()
// =============================================================================

#[test]
#[serial]
fn test_validate_reports_single_error() {
    std::env::remove_var(WEBHOOK_ENV_VAR);

    let cases = [
        (json!({}), "required", Some("Slack webhook URL is required")),
        (
            json!({"webhook": ""}),
            "required",
            Some("Slack webhook URL is required"),
        ),
        (json!({"webhook": "not-a-valid-url"}), "format", None),
        (
            json!({"webhook": "http://hooks.slack.com/services/T00000000/B00000000/XXXX"}),
            "format",
            Some("webhook URL must use HTTPS"),
        ),
        (
            json!({"webhook": "https://evil.example.com/services/T00000000/B00000000/XXXX"}),
            "format",
            Some("webhook URL must be on hooks.slack.com"),
        ),
        (
            json!({"webhook": "https://hooks.slack.com/wrong/T00000000/B00000000/XXXX"}),
            "format",
            Some("webhook URL path must start with /services/"),
        ),
    ];

    for (raw, code, message) in cases {
        let response = plugin().validate(&config(raw.clone()));

        assert!(!response.valid, "expected {} to be invalid", raw);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].code.as_str(), code);
        if let Some(message) = message {
            assert!(
                response.errors[0].message.contains(message),
                "expected {:?} to contain {:?}",
                response.errors[0].message,
                message
            );
        }
    }
}

#[test]
#[serial]
fn test_validate_accepts() {
    std::env::remove_var(WEBHOOK_ENV_VAR);

    let cases = [
        json!({
            "webhook": "https://hooks.slack.com/services/T00000000/B00000000/TESTTOKEN"
        }),
        json!({
            "webhook": "https://hooks.slack.com/services/T00000000/B00000000/TESTTOKEN",
            "channel": "#releases",
            "username": "ReleaseBot",
            "icon_emoji": ":ship:",
            "notify_on_success": true,
            "notify_on_error": false
        }),
    ];

    for raw in cases {
        let response = plugin().validate(&config(raw));

        assert!(response.valid);
        assert!(response.errors.is_empty());
    }
}

#[test]
#[serial]
fn test_validate_accepts_webhook_from_environment() {
    std::env::set_var(
        WEBHOOK_ENV_VAR,
        "https://hooks.slack.com/services/T00000000/B00000000/TESTTOKEN",
    );

    let response = plugin().validate(&config(json!({})));

    std::env::remove_var(WEBHOOK_ENV_VAR);

    assert!(response.valid);
}

#[test]
fn test_validate_has_no_side_effects() {
    let sender = RecordingSender::new();
    let plugin = SlackPlugin::new(sender.clone());

    plugin.validate(&config(json!({"webhook": "https://hooks.slack.com/services/T/B/X"})));

    assert_eq!(sender.call_count(), 0);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_non_https_scheme_is_format_error(
        scheme in "(http|ftp|ws|wss|file)",
        token in "[A-Z0-9]{1,12}",
    ) {
        let url = format!("{}://hooks.slack.com/services/{}", scheme, token);
        let err = validate_webhook_url(&url).unwrap_err();

        prop_assert_eq!(err.code, ValidationCode::Format);
        prop_assert!(err.message.contains("HTTPS"));
    }

    #[test]
    fn prop_foreign_host_is_format_error(host in "[a-z]{1,10}\\.(com|net|org)") {
        let url = format!("https://{}/services/T00/B00/XXX", host);
        let err = validate_webhook_url(&url).unwrap_err();

        prop_assert_eq!(err.code, ValidationCode::Format);
        prop_assert!(err.message.contains("hooks.slack.com"));
    }

    #[test]
    fn prop_wrong_path_is_format_error(segment in "[a-z]{1,10}") {
        prop_assume!(segment != "services");
        let url = format!("https://hooks.slack.com/{}/T00/B00/XXX", segment);
        let err = validate_webhook_url(&url).unwrap_err();

        prop_assert_eq!(err.code, ValidationCode::Format);
        prop_assert!(err.message.contains("/services/"));
    }

    #[test]
    fn prop_slack_urls_are_valid(path in "[A-Za-z0-9]{1,12}/[A-Za-z0-9]{1,12}/[A-Za-z0-9]{1,24}") {
        let url = format!("https://hooks.slack.com/services/{}", path);
        prop_assert!(validate_webhook_url(&url).is_ok());
    }
}
