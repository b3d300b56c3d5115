//! Event-specific notification formatting.
//!
//! Wording here is load-bearing: downstream consumers match on the exact
//! titles and body fragments, so changes must stay byte-compatible.

use crate::postal::{
    DecodedEvent, DnsErrorEvent, Message, MessageBounceEvent, MessageClickEvent,
    MessageLoadedEvent, MessageStatusEvent, StatusKind,
};

use super::link::DeepLinkContext;

/// A rendered notification: title, markdown body and an optional deep
/// link back into the Postal web UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub url: Option<String>,
}

/// Render a decoded event into a notification.
///
/// Pure function: the same event and context always produce the same
/// notification.
pub fn format(event: &DecodedEvent, ctx: Option<&DeepLinkContext>) -> Notification {
    match event {
        DecodedEvent::Status(kind, payload) => format_status(*kind, payload, ctx),
        DecodedEvent::Loaded(payload) => format_loaded(payload, ctx),
        DecodedEvent::Bounced(payload) => format_bounced(payload, ctx),
        DecodedEvent::Clicked(payload) => format_clicked(payload, ctx),
        DecodedEvent::DnsError(payload) => format_dns_error(payload),
        DecodedEvent::Unknown { tag } => format_unknown(tag),
    }
}

fn format_status(
    kind: StatusKind,
    payload: &MessageStatusEvent,
    ctx: Option<&DeepLinkContext>,
) -> Notification {
    let title = match kind {
        StatusKind::Sent => "✅ Message delivered successfully",
        StatusKind::Delayed => "⚠ Message delivery delayed",
        StatusKind::DeliveryFailed => "❗ Message delivery failed",
        StatusKind::Held => "⚠ Message delivery was held by Postal",
    };

    let mut body = message_line(&payload.message);
    body += &format!("{}\n\n---\n\n", payload.details);
    body += &format!(
        "**Delivery time:** {}\n\n",
        format_delivery_time(payload.time)
    );
    body += &format!("**Sent with SSL/TLS:** {}\n\n", payload.sent_with_ssl);
    body += &output_block(&payload.output);

    Notification {
        title: title.to_string(),
        body,
        url: ctx.map(|c| c.message_url(payload.message.id, "")),
    }
}

fn format_loaded(payload: &MessageLoadedEvent, ctx: Option<&DeepLinkContext>) -> Notification {
    let mut body = message_line(&payload.message);
    body += &format!("**IP address:** {}\n\n", payload.ip_address);
    body += &format!("**User agent:** {}", payload.user_agent);

    Notification {
        title: "👀 Message was opened".to_string(),
        body,
        url: ctx.map(|c| c.message_url(payload.message.id, "/activity")),
    }
}

fn format_bounced(payload: &MessageBounceEvent, ctx: Option<&DeepLinkContext>) -> Notification {
    // The link targets the original outbound message, not the bounce
    let mut body = message_line(&payload.original_message);
    body += &format!("**Bounce received from:** {}\n\n", payload.bounce.from);
    body += "See the original message page for delivery details.";

    Notification {
        title: "❗ Bounce message received".to_string(),
        body,
        url: ctx.map(|c| c.message_url(payload.original_message.id, "")),
    }
}

fn format_clicked(payload: &MessageClickEvent, ctx: Option<&DeepLinkContext>) -> Notification {
    let mut body = message_line(&payload.message);
    body += &format!("**Clicked URL:** {}\n\n", payload.url);
    body += &format!("**IP address:** {}\n\n", payload.ip_address);
    body += &format!("**User agent:** {}", payload.user_agent);

    Notification {
        title: "👀 Link in message was clicked".to_string(),
        body,
        url: ctx.map(|c| c.message_url(payload.message.id, "/activity")),
    }
}

fn format_dns_error(payload: &DnsErrorEvent) -> Notification {
    let mut body = format!(
        "**Domain:** {} (server \"{}\")\n\n",
        payload.domain, payload.server.name
    );
    body += &dns_check_line("SPF", &payload.spf_status, payload.spf_error.as_deref());
    body += &dns_check_line("DKIM", &payload.dkim_status, payload.dkim_error.as_deref());
    body += &dns_check_line("MX", &payload.mx_status, payload.mx_error.as_deref());
    body += &dns_check_line(
        "Return path",
        &payload.return_path_status,
        payload.return_path_error.as_deref(),
    );

    // No message id exists in this schema; the server permalink is passed
    // through verbatim. Postal does not document whether it is a full URL.
    let url = if payload.server.permalink.is_empty() {
        None
    } else {
        Some(payload.server.permalink.clone())
    };

    Notification {
        title: "❗ DNS setup check failed".to_string(),
        body,
        url,
    }
}

fn format_unknown(tag: &str) -> Notification {
    Notification {
        title: "Read unknown event name in Postal message".to_string(),
        body: format!("Event name was '{}'", tag),
        url: None,
    }
}

/// Italic sender/recipient/subject line shared by all message-carrying
/// bodies.
fn message_line(message: &Message) -> String {
    format!(
        "_{} &rarr; {}: \"{}\"_\n\n",
        message.from, message.to, message.subject
    )
}

/// Zero renders as "instant"; anything else as seconds with two decimals.
fn format_delivery_time(time: f64) -> String {
    if time == 0.0 {
        "instant".to_string()
    } else {
        format!("{:.2} seconds", time)
    }
}

/// Empty output renders as the literal "none"; otherwise the output is
/// wrapped in a fenced block exactly as received.
fn output_block(output: &str) -> String {
    if output.is_empty() {
        "**Output:** none".to_string()
    } else {
        format!("**Output:**\n\n```{}```", output)
    }
}

fn dns_check_line(name: &str, status: &str, error: Option<&str>) -> String {
    match error {
        Some(error) => format!("**{}:** {} ({})\n\n", name, status, error),
        None => format!("**{}:** {}\n\n", name, status),
    }
}
