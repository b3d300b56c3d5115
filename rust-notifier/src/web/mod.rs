//! Web server module for handling inbound Postal webhooks.
//!
//! This module provides a thin web server that:
//! - Receives Postal webhook callbacks
//! - Renders them into notifications
//! - Pushes the result to Gotify
//!
//! All classification and formatting lives in the `postal` and `notify`
//! modules; this layer is glue.

pub mod handlers;

pub use handlers::{health, postal_webhook, AppState, HealthResponse, LinkQuery, WebhookResponse};
