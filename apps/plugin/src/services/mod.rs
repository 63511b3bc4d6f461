pub mod notification;
pub mod plugin;

pub use notification::{MessageSender, SlackClient, WebhookRules};
pub use plugin::SlackPlugin;
