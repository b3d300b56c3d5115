//! Async Gotify client for pushing notifications.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::notify::Notification;

use super::types::GotifyMessage;

/// Shared Gotify push client.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections
/// across requests.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    base_url: String,
    app_token: String,
}

impl Notifier {
    /// Create a notifier for the given Gotify base URL and application
    /// token.
    pub fn new(base_url: &str, app_token: &str, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_token: app_token.to_string(),
        })
    }

    /// Push a rendered notification to Gotify.
    pub async fn push(&self, notification: &Notification) -> Result<()> {
        let message = GotifyMessage::from_notification(notification);
        let url = format!("{}/message", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("X-Gotify-Key", &self.app_token)
            .json(&message)
            .send()
            .await
            .context("Failed to send Gotify request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "gotify_push_rejected");
            anyhow::bail!("Gotify returned {}", status);
        }

        info!(
            title = %notification.title,
            has_click_url = notification.url.is_some(),
            "gotify_pushed"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_strips_trailing_slash() {
        let notifier = Notifier::new("https://gotify.example.com/", "token", 8000).unwrap();

        assert_eq!(notifier.base_url, "https://gotify.example.com");
    }
}
