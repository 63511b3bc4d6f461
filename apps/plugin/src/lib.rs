//! Relicta Slack Plugin Library
//!
//! Release lifecycle notifications delivered to Slack incoming webhooks.
//! This module exposes the plugin components for the host shell and tests.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
