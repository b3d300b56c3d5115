//! PostalNotify - Postal webhook to Gotify notification bridge.
//!
//! This library turns webhook callbacks from a Postal mail server into
//! markdown push notifications on a Gotify server.
//!
//! ## Architecture
//!
//! ```text
//! Postal webhook → Web Server → decode → format → Gotify push
//! ```

pub mod config;
pub mod gotify;
pub mod notify;
pub mod postal;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use gotify::Notifier;
pub use notify::{process_webhook, DeepLinkContext, Notification};
pub use postal::{decode, DecodeError, DecodedEvent};
pub use web::AppState;
