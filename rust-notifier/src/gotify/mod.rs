//! Gotify push delivery module.
//!
//! Wraps the Gotify REST API: rendered notifications are posted to
//! `POST {url}/message` as markdown-tagged messages, with a clickable
//! link annotation when the notification carries a deep link.

pub mod client;
pub mod types;

pub use client::Notifier;
pub use types::GotifyMessage;
