//! Request and response shapes exchanged with the host release tool.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::release::{Hook, ReleaseContext};

/// Untyped option map as supplied by the host configuration system
pub type RawConfig = HashMap<String, serde_json::Value>;

// =============================================================================
// Validation
// =============================================================================

/// Short machine-readable validation error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCode {
    Required,
    Format,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::Required => "required",
            ValidationCode::Format => "format",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-scoped configuration error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub code: ValidationCode,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ValidationCode::Required,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ValidationCode::Format,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidateResponse {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// DTO for the validate endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub config: RawConfig,
}

// =============================================================================
// Execution
// =============================================================================

/// One hook invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub hook: Hook,
    #[serde(default)]
    pub config: RawConfig,
    #[serde(default)]
    pub context: ReleaseContext,
    #[serde(default)]
    pub dry_run: bool,
}

/// Outcome of one hook invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub outputs: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl ExecuteResponse {
    /// Creates a successful result
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Creates a failed result
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.into(),
            ..Default::default()
        }
    }

    pub fn with_outputs(mut self, outputs: HashMap<String, serde_json::Value>) -> Self {
        self.outputs = outputs;
        self
    }
}

// =============================================================================
// Metadata
// =============================================================================

/// Static plugin metadata reported to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub hooks: Vec<Hook>,
    /// JSON Schema document describing the accepted options
    pub config_schema: String,
}
