//! Wire types for Postal webhook payloads.
//!
//! Field names match Postal's JSON field names. The envelope `payload` is
//! kept opaque until the event tag is known, then re-decoded against the
//! kind-specific schema.

use serde::Deserialize;
use serde_json::Value;

/// Top-level webhook wrapper carrying the event tag and a not-yet-decoded
/// inner payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Event tag, e.g. "MessageSent"
    pub event: String,
    /// Webhook timestamp (fractional epoch seconds)
    #[serde(default)]
    pub timestamp: f64,
    /// Webhook delivery UUID
    #[serde(default)]
    pub uuid: String,
    /// Opaque event payload, decoded once the tag is known
    pub payload: Value,
}

/// Which of the four shared-schema status tags an event carried.
///
/// Sent, delayed, delivery-failed and held events all use the same payload
/// schema but are worded differently, so the original tag is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Sent,
    Delayed,
    DeliveryFailed,
    Held,
}

impl StatusKind {
    /// Map an event tag to a status kind, if it is one of the four.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "MessageSent" => Some(StatusKind::Sent),
            "MessageDelayed" => Some(StatusKind::Delayed),
            "MessageDeliveryFailed" => Some(StatusKind::DeliveryFailed),
            "MessageHeld" => Some(StatusKind::Held),
            _ => None,
        }
    }

    /// The original Postal event tag.
    pub fn tag(self) -> &'static str {
        match self {
            StatusKind::Sent => "MessageSent",
            StatusKind::Delayed => "MessageDelayed",
            StatusKind::DeliveryFailed => "MessageDeliveryFailed",
            StatusKind::Held => "MessageHeld",
        }
    }
}

/// A single email message as embedded in Postal event payloads.
///
/// The numeric `id` is the join key used to build deep links back into
/// the Postal web UI.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(default)]
    pub token: String,
    /// "incoming" or "outgoing"
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub spam_status: String,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Payload shared by the four status event kinds.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageStatusEvent {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: String,
    /// Raw delivery output from the remote server; may be empty
    #[serde(default)]
    pub output: String,
    /// Delivery time in fractional seconds; zero means instant
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub sent_with_ssl: bool,
    #[serde(default)]
    pub timestamp: f64,
    pub message: Message,
}

/// Payload for `MessageBounced` events. Carries both the original
/// outbound message and the inbound bounce message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBounceEvent {
    pub original_message: Message,
    pub bounce: Message,
}

/// Payload for `MessageLinkClicked` events.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageClickEvent {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: String,
    pub message: Message,
}

/// Payload for `MessageLoaded` (open tracking) events.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageLoadedEvent {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: String,
    pub message: Message,
}

/// Payload for `DomainDNSError` events. Each of the four DNS checks has
/// an independent status and optional error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsErrorEvent {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub dns_checked_at: f64,
    #[serde(default)]
    pub spf_status: String,
    #[serde(default)]
    pub spf_error: Option<String>,
    #[serde(default)]
    pub dkim_status: String,
    #[serde(default)]
    pub dkim_error: Option<String>,
    #[serde(default)]
    pub mx_status: String,
    #[serde(default)]
    pub mx_error: Option<String>,
    #[serde(default)]
    pub return_path_status: String,
    #[serde(default)]
    pub return_path_error: Option<String>,
    pub server: Server,
}

/// The Postal server a DNS-error event refers to.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    /// Postal exposes this as an opaque value; it is attached verbatim
    /// when present, without assuming it is a complete URL
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub organization: String,
}
