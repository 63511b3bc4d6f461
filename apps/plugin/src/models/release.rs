//! Release lifecycle models supplied by the host release tool.

use serde::{Deserialize, Serialize};

// =============================================================================
// Hook Enum
// =============================================================================

/// Named point in the release lifecycle at which plugins are invoked.
///
/// Names the host sends that are not listed here deserialize to
/// `Other`, so newer hosts never break older plugins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Hook {
    PreInit,
    PostInit,
    PrePlan,
    PostPlan,
    PreVersion,
    PostVersion,
    PreNotes,
    PostNotes,
    PreApprove,
    PostApprove,
    PrePublish,
    PostPublish,
    OnSuccess,
    OnError,
    Other(String),
}

impl Hook {
    pub fn as_str(&self) -> &str {
        match self {
            Hook::PreInit => "pre-init",
            Hook::PostInit => "post-init",
            Hook::PrePlan => "pre-plan",
            Hook::PostPlan => "post-plan",
            Hook::PreVersion => "pre-version",
            Hook::PostVersion => "post-version",
            Hook::PreNotes => "pre-notes",
            Hook::PostNotes => "post-notes",
            Hook::PreApprove => "pre-approve",
            Hook::PostApprove => "post-approve",
            Hook::PrePublish => "pre-publish",
            Hook::PostPublish => "post-publish",
            Hook::OnSuccess => "on-success",
            Hook::OnError => "on-error",
            Hook::Other(name) => name,
        }
    }
}

impl From<String> for Hook {
    fn from(name: String) -> Self {
        match name.as_str() {
            "pre-init" => Hook::PreInit,
            "post-init" => Hook::PostInit,
            "pre-plan" => Hook::PrePlan,
            "post-plan" => Hook::PostPlan,
            "pre-version" => Hook::PreVersion,
            "post-version" => Hook::PostVersion,
            "pre-notes" => Hook::PreNotes,
            "post-notes" => Hook::PostNotes,
            "pre-approve" => Hook::PreApprove,
            "post-approve" => Hook::PostApprove,
            "pre-publish" => Hook::PrePublish,
            "post-publish" => Hook::PostPublish,
            "on-success" => Hook::OnSuccess,
            "on-error" => Hook::OnError,
            _ => Hook::Other(name),
        }
    }
}

impl From<Hook> for String {
    fn from(hook: Hook) -> Self {
        match hook {
            Hook::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Release Context
// =============================================================================

/// Read-only snapshot of the release being processed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseContext {
    pub version: String,
    pub previous_version: String,
    pub tag_name: String,
    /// major, minor, patch, or free text
    pub release_type: String,
    pub branch: String,
    pub commit_sha: String,
    pub release_notes: String,
    pub repository_url: String,
    pub repository_name: String,
    pub changes: Option<CategorizedChanges>,
}

/// Commits grouped by conventional-commit category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizedChanges {
    pub features: Vec<ConventionalCommit>,
    pub fixes: Vec<ConventionalCommit>,
    pub breaking: Vec<ConventionalCommit>,
    pub other: Vec<ConventionalCommit>,
}

/// A single parsed conventional commit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionalCommit {
    pub hash: String,
    #[serde(rename = "type")]
    pub commit_type: String,
    pub scope: String,
    pub description: String,
    pub breaking: bool,
}
