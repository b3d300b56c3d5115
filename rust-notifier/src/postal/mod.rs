//! Postal webhook ingestion module.
//!
//! This module defines the wire types for Postal's outbound webhooks and
//! the decoder that turns raw request bytes into a typed event.
//!
//! ## Decoding Flow
//!
//! ```text
//! raw bytes → Envelope → DecodedEvent (one variant per event kind)
//! ```

pub mod decode;
pub mod types;

pub use decode::{decode, DecodeError, DecodedEvent};
pub use types::{
    DnsErrorEvent, Envelope, Message, MessageBounceEvent, MessageClickEvent,
    MessageLoadedEvent, MessageStatusEvent, Server, StatusKind,
};
