//! Two-stage webhook decoder.
//!
//! Stage one parses the envelope (event tag + opaque payload), stage two
//! decodes the payload against the schema the tag selects. An unrecognized
//! tag is a successful decode (`DecodedEvent::Unknown`), never an error:
//! the caller must still be able to surface a notification naming the tag.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::types::{
    DnsErrorEvent, Envelope, MessageBounceEvent, MessageClickEvent, MessageLoadedEvent,
    MessageStatusEvent, StatusKind,
};

/// A fully decoded webhook event, one variant per recognized kind.
#[derive(Debug, Clone)]
pub enum DecodedEvent {
    /// One of the four shared-schema status events; the tag is retained
    /// because wording differs per kind.
    Status(StatusKind, MessageStatusEvent),
    Loaded(MessageLoadedEvent),
    Bounced(MessageBounceEvent),
    Clicked(MessageClickEvent),
    DnsError(DnsErrorEvent),
    /// Event tag not in the recognized set; the literal tag is kept so it
    /// can be reported verbatim.
    Unknown { tag: String },
}

impl DecodedEvent {
    /// The event tag, for logging.
    pub fn kind(&self) -> &str {
        match self {
            DecodedEvent::Status(kind, _) => kind.tag(),
            DecodedEvent::Loaded(_) => "MessageLoaded",
            DecodedEvent::Bounced(_) => "MessageBounced",
            DecodedEvent::Clicked(_) => "MessageLinkClicked",
            DecodedEvent::DnsError(_) => "DomainDNSError",
            DecodedEvent::Unknown { tag } => tag,
        }
    }
}

/// Decode failure, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed top-level JSON or missing envelope fields.
    #[error("invalid webhook envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The event tag was recognized but the inner payload does not match
    /// its schema.
    #[error("invalid {kind} payload: {source}")]
    Payload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Notification title for the failing stage.
    pub fn title(&self) -> &'static str {
        match self {
            DecodeError::Envelope(_) => "Error unmarshalling Postal message",
            DecodeError::Payload { .. } => "Error unmarshalling Postal event payload",
        }
    }
}

/// Decode raw webhook bytes into a typed event.
///
/// Pure transformation; the only side effect is debug logging.
pub fn decode(raw: &[u8]) -> Result<DecodedEvent, DecodeError> {
    let envelope: Envelope = serde_json::from_slice(raw).map_err(DecodeError::Envelope)?;

    debug!(
        event = %envelope.event,
        uuid = %envelope.uuid,
        "postal_envelope_decoded"
    );

    if let Some(kind) = StatusKind::from_tag(&envelope.event) {
        let payload = decode_payload(kind.tag(), envelope.payload)?;
        return Ok(DecodedEvent::Status(kind, payload));
    }

    match envelope.event.as_str() {
        "MessageLoaded" => Ok(DecodedEvent::Loaded(decode_payload(
            "MessageLoaded",
            envelope.payload,
        )?)),
        "MessageBounced" => Ok(DecodedEvent::Bounced(decode_payload(
            "MessageBounced",
            envelope.payload,
        )?)),
        "MessageLinkClicked" => Ok(DecodedEvent::Clicked(decode_payload(
            "MessageLinkClicked",
            envelope.payload,
        )?)),
        "DomainDNSError" => Ok(DecodedEvent::DnsError(decode_payload(
            "DomainDNSError",
            envelope.payload,
        )?)),
        tag => Ok(DecodedEvent::Unknown {
            tag: tag.to_string(),
        }),
    }
}

/// Decode the inner payload against the schema selected by the tag.
fn decode_payload<T: DeserializeOwned>(
    kind: &'static str,
    payload: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|source| DecodeError::Payload { kind, source })
}
