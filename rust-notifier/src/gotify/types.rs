//! Gotify message envelope.

use serde::Serialize;
use serde_json::{json, Value};

use crate::notify::Notification;

/// Outbound Gotify message.
///
/// The `extras` map tags the body as markdown so Gotify clients render it,
/// and carries the click URL when the notification has a deep link.
#[derive(Debug, Clone, Serialize)]
pub struct GotifyMessage {
    pub title: String,
    pub message: String,
    pub extras: Value,
}

impl GotifyMessage {
    /// Wrap a rendered notification in the Gotify envelope.
    pub fn from_notification(notification: &Notification) -> Self {
        let mut extras = json!({
            "client::display": {
                "contentType": "text/markdown"
            }
        });

        if let Some(url) = &notification.url {
            extras["client::notification"] = json!({
                "click": { "url": url }
            });
        }

        Self {
            title: notification.title.clone(),
            message: notification.body.clone(),
            extras,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(url: Option<&str>) -> Notification {
        Notification {
            title: "✅ Message delivered successfully".to_string(),
            body: "_a &rarr; b: \"c\"_".to_string(),
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_message_is_markdown_tagged() {
        let message = GotifyMessage::from_notification(&notification(None));

        assert_eq!(
            message.extras["client::display"]["contentType"],
            "text/markdown"
        );
        assert!(message.extras.get("client::notification").is_none());
    }

    #[test]
    fn test_message_carries_click_url() {
        let message = GotifyMessage::from_notification(&notification(Some(
            "https://testing.example.com/org/o/servers/s/messages/1",
        )));

        assert_eq!(
            message.extras["client::notification"]["click"]["url"],
            "https://testing.example.com/org/o/servers/s/messages/1"
        );
    }

    #[test]
    fn test_message_serializes_title_and_body() {
        let json = serde_json::to_value(GotifyMessage::from_notification(&notification(None)))
            .unwrap();

        assert_eq!(json["title"], "✅ Message delivered successfully");
        assert_eq!(json["message"], "_a &rarr; b: \"c\"_");
    }
}
