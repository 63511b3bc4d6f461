pub mod message;
pub mod plugin;
pub mod release;
pub mod settings;

pub use message::{Attachment, AttachmentColor, Field, SlackMessage};
pub use plugin::{
    ExecuteRequest, ExecuteResponse, PluginInfo, RawConfig, ValidateRequest, ValidateResponse,
    ValidationCode, ValidationError,
};
pub use release::{CategorizedChanges, ConventionalCommit, Hook, ReleaseContext};
pub use settings::{SlackSettings, WEBHOOK_ENV_VAR};
