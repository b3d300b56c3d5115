//! Webhook endpoint handlers.
//!
//! The webhook handler reads the raw body, runs the decode/format
//! pipeline, and pushes the result to Gotify. Decode failures never
//! produce an HTTP error: they are rendered into error notifications so
//! the operator sees them.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::gotify::Notifier;
use crate::notify::{process_webhook, DeepLinkContext};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: Config, notifier: Notifier) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Postal Webhook
// =============================================================================

/// Optional deep-link query parameters.
///
/// All three must be present to override the configured defaults.
#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    pub host: Option<String>,
    pub org: Option<String>,
    pub name: Option<String>,
}

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Postal webhook endpoint.
///
/// This endpoint:
/// 1. Builds a deep-link context from query parameters or config defaults
/// 2. Renders the webhook into a notification
/// 3. Pushes the notification to Gotify
pub async fn postal_webhook(
    State(state): State<AppState>,
    Query(query): Query<LinkQuery>,
    body: Bytes,
) -> impl IntoResponse {
    info!(
        body_length = body.len(),
        has_query_host = query.host.is_some(),
        "postal_webhook_received"
    );

    let ctx = link_context(query, &state.config);
    let notification = process_webhook(&body, ctx.as_ref());

    if state.config.verbose {
        debug!(
            title = %notification.title,
            body = %notification.body,
            url = ?notification.url,
            "notification_rendered"
        );
    }

    if let Err(e) = state.notifier.push(&notification).await {
        error!(error = %e, title = %notification.title, "gotify_push_failed");
        return (
            StatusCode::BAD_GATEWAY,
            Json(WebhookResponse {
                status: "push_failed",
                title: Some(notification.title),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(WebhookResponse {
            status: "delivered",
            title: Some(notification.title),
        }),
    )
}

/// Deep-link context from query parameters, falling back to the
/// configured defaults when the query does not carry all three parts.
fn link_context(query: LinkQuery, config: &Config) -> Option<DeepLinkContext> {
    DeepLinkContext::from_parts(query.host, query.org, query.name)
        .or_else(|| config.default_link_context())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_defaults(host: Option<&str>) -> Config {
        Config {
            port: 8080,
            gotify_url: "http://localhost:80".to_string(),
            gotify_token: "t".to_string(),
            request_timeout_ms: 8000,
            postal_web_host: host.map(str::to_string),
            postal_organization: host.map(|_| "default-org".to_string()),
            postal_server_name: host.map(|_| "default-server".to_string()),
            verbose: false,
        }
    }

    #[test]
    fn test_link_context_from_query() {
        let query = LinkQuery {
            host: Some("https://testing.example.com".to_string()),
            org: Some("testing-org".to_string()),
            name: Some("testing-server".to_string()),
        };

        let ctx = link_context(query, &config_with_defaults(None)).unwrap();

        assert_eq!(ctx.host, "https://testing.example.com");
        assert_eq!(ctx.organization, "testing-org");
        assert_eq!(ctx.server_name, "testing-server");
    }

    #[test]
    fn test_link_context_partial_query_falls_back_to_defaults() {
        let query = LinkQuery {
            host: Some("https://testing.example.com".to_string()),
            org: None,
            name: Some("testing-server".to_string()),
        };

        let ctx = link_context(
            query,
            &config_with_defaults(Some("https://postal.example.com")),
        )
        .unwrap();

        assert_eq!(ctx.host, "https://postal.example.com");
        assert_eq!(ctx.organization, "default-org");
    }

    #[test]
    fn test_link_context_absent() {
        let query = LinkQuery {
            host: None,
            org: None,
            name: None,
        };

        assert!(link_context(query, &config_with_defaults(None)).is_none());
    }
}
