pub mod health;
pub mod plugin;
