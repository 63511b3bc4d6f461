//! Release event to Slack message formatting.

use chrono::Utc;

use crate::models::{
    Attachment, AttachmentColor, Field, ReleaseContext, SlackMessage, SlackSettings,
};

/// Maximum number of raw release-note characters kept, counted before
/// HTML escaping
pub const MAX_CHANGELOG_CHARS: usize = 2000;

const TRUNCATION_MARKER: &str = "...";
const FOOTER: &str = "Relicta";

// =============================================================================
// Mentions
// =============================================================================

/// Formats user/group references as Slack inline mentions.
///
/// `U123` and `@U123` become `<@U123>`; tokens starting with `<` are
/// assumed to be formatted already (`<@U123>`, `<!subteam^S123>`).
pub fn format_mentions(mentions: &[String]) -> String {
    mentions
        .iter()
        .map(|mention| {
            if mention.starts_with('<') {
                mention.clone()
            } else {
                format!("<@{}>", mention.strip_prefix('@').unwrap_or(mention))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Text helpers
// =============================================================================

/// Escapes characters that Slack or an HTML renderer would interpret
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cuts `text` to at most `max_chars` characters, marking the cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

fn display_version(ctx: &ReleaseContext) -> String {
    if ctx.version.starts_with('v') {
        ctx.version.clone()
    } else {
        format!("v{}", ctx.version)
    }
}

fn with_mentions(mentions: &str, text: &str) -> String {
    if mentions.is_empty() {
        text.to_string()
    } else {
        format!("{} {}", mentions, text)
    }
}

fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(7) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

fn base_message(settings: &SlackSettings) -> SlackMessage {
    SlackMessage {
        channel: settings.channel.clone(),
        username: settings.username.clone(),
        icon_emoji: settings.icon_emoji.clone(),
        icon_url: settings.icon_url.clone(),
        ..Default::default()
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Builds the notification for a published release
pub fn build_success_message(settings: &SlackSettings, ctx: &ReleaseContext) -> SlackMessage {
    let version = display_version(ctx);
    let headline = format!("Release {} published", version);

    let title = if ctx.release_type.is_empty() {
        format!("Release {}", version)
    } else {
        format!("Release {} ({})", version, ctx.release_type)
    };

    let mut body = format!(":rocket: {}", headline);
    if settings.include_changelog && !ctx.release_notes.is_empty() {
        let notes = truncate_chars(&ctx.release_notes, MAX_CHANGELOG_CHARS);
        body.push_str("\n\n");
        body.push_str(&escape_html(&notes));
    }

    let mut fields = vec![Field::short("Version", ctx.version.as_str())];
    if !ctx.previous_version.is_empty() {
        fields.push(Field::short("Previous", ctx.previous_version.as_str()));
    }
    if !ctx.tag_name.is_empty() {
        fields.push(Field::short("Tag", ctx.tag_name.as_str()));
    }
    if !ctx.branch.is_empty() {
        fields.push(Field::short("Branch", ctx.branch.as_str()));
    }
    if !ctx.repository_name.is_empty() {
        fields.push(Field::short("Repository", ctx.repository_name.as_str()));
    }
    if let Some(ref changes) = ctx.changes {
        fields.push(Field::short("Features", changes.features.len().to_string()));
        fields.push(Field::short("Fixes", changes.fixes.len().to_string()));
        fields.push(Field::short("Breaking Changes", changes.breaking.len().to_string()));
    }

    let title_link = if !ctx.repository_url.is_empty() && !ctx.tag_name.is_empty() {
        format!(
            "{}/releases/tag/{}",
            ctx.repository_url.trim_end_matches('/'),
            ctx.tag_name
        )
    } else {
        String::new()
    };

    let mentions = format_mentions(&settings.mentions);

    SlackMessage {
        text: with_mentions(&mentions, &headline),
        attachments: vec![Attachment {
            fallback: headline.clone(),
            color: AttachmentColor::Good,
            title,
            title_link,
            text: body,
            fields,
            footer: FOOTER.to_string(),
            ts: Some(Utc::now().timestamp()),
            mrkdwn_in: vec!["text".to_string()],
        }],
        ..base_message(settings)
    }
}

/// Builds the notification for a failed release
pub fn build_error_message(settings: &SlackSettings, ctx: &ReleaseContext) -> SlackMessage {
    let version = display_version(ctx);
    let headline = format!("Release {} failed", version);

    let body = if ctx.branch.is_empty() {
        format!(":x: Release {} failed", version)
    } else {
        format!(":x: Release {} failed on branch `{}`", version, ctx.branch)
    };

    let mut fields = Vec::new();
    if !ctx.commit_sha.is_empty() {
        fields.push(Field::short("Commit", short_sha(&ctx.commit_sha)));
    }
    if !ctx.tag_name.is_empty() {
        fields.push(Field::short("Tag", ctx.tag_name.as_str()));
    }

    let mentions = format_mentions(&settings.mentions);

    SlackMessage {
        text: with_mentions(&mentions, &headline),
        attachments: vec![Attachment {
            fallback: headline.clone(),
            color: AttachmentColor::Danger,
            title: headline,
            text: body,
            fields,
            footer: FOOTER.to_string(),
            ts: Some(Utc::now().timestamp()),
            mrkdwn_in: vec!["text".to_string()],
            ..Default::default()
        }],
        ..base_message(settings)
    }
}
