//! Webhook-to-notification pipeline.
//!
//! This module turns raw webhook bytes into a rendered notification:
//!
//! ```text
//! raw bytes → postal::decode() → format() → Notification
//! ```
//!
//! Decode failures are recovered here into best-effort notifications so
//! that a malformed webhook is surfaced to the operator channel instead
//! of being dropped.

pub mod format;
pub mod link;

use tracing::{info, warn};

use crate::postal;

pub use format::{format, Notification};
pub use link::DeepLinkContext;

/// Process raw webhook bytes into a notification.
///
/// Never fails: decode errors become notifications whose title names the
/// failing stage and whose body carries the error text.
pub fn process_webhook(raw: &[u8], ctx: Option<&DeepLinkContext>) -> Notification {
    match postal::decode(raw) {
        Ok(event) => {
            info!(event = event.kind(), has_link_context = ctx.is_some(), "webhook_decoded");
            format(&event, ctx)
        }
        Err(err) => {
            warn!(error = %err, "webhook_decode_failed");
            Notification {
                title: err.title().to_string(),
                body: err.to_string(),
                url: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE_SENT: &[u8] = br#"{
        "event": "MessageSent",
        "timestamp": 0.0,
        "uuid": "irrelevant",
        "payload": {
            "status": "Sent",
            "details": "Message sent by SMTP to aspmx.l.google.com",
            "output": "250 2.0.0 OK",
            "time": 0.22,
            "sent_with_ssl": true,
            "timestamp": 1477945177.12994,
            "message": {
                "id": 12345,
                "token": "abcdef123",
                "direction": "outgoing",
                "message_id": "5817a64332f44@app34.mail",
                "to": "test@example.com",
                "from": "sales@awesomeapp.com",
                "subject": "Welcome to AwesomeApp",
                "timestamp": 1477945177.12994,
                "spam_status": "NotSpam",
                "tag": "welcome"
            }
        }
    }"#;

    fn testing_context() -> DeepLinkContext {
        DeepLinkContext {
            host: "https://testing.example.com".to_string(),
            organization: "testing-org".to_string(),
            server_name: "testing-server".to_string(),
        }
    }

    #[test]
    fn test_process_webhook_with_click_url() {
        let ctx = testing_context();
        let result = process_webhook(MESSAGE_SENT, Some(&ctx));

        let url = result.url.expect("notification should carry a click URL");
        assert!(url.starts_with(
            "https://testing.example.com/org/testing-org/servers/testing-server/messages/"
        ));
    }

    #[test]
    fn test_process_webhook_without_click_url() {
        let result = process_webhook(MESSAGE_SENT, None);

        assert_eq!(result.url, None);
    }

    #[test]
    fn test_process_webhook_message_sent_title() {
        let result = process_webhook(MESSAGE_SENT, None);

        assert_eq!(result.title, "✅ Message delivered successfully");
    }

    #[test]
    fn test_process_webhook_recovers_envelope_error() {
        let result = process_webhook(b"{ this is not json", None);

        assert_eq!(result.title, "Error unmarshalling Postal message");
        assert!(!result.body.is_empty());
        assert_eq!(result.url, None);
    }

    #[test]
    fn test_process_webhook_recovers_payload_error() {
        let raw = br#"{"event": "MessageBounced", "timestamp": 0.0, "uuid": "u", "payload": {}}"#;
        let result = process_webhook(raw, None);

        assert_eq!(result.title, "Error unmarshalling Postal event payload");
        assert!(result.body.contains("MessageBounced"));
    }

    #[test]
    fn test_process_webhook_unknown_event() {
        let raw = br#"{"event": "SomethingNew", "timestamp": 0.0, "uuid": "u", "payload": {}}"#;
        let result = process_webhook(raw, None);

        assert_eq!(result.title, "Read unknown event name in Postal message");
        assert!(result.body.contains("'SomethingNew'"));
    }
}
