//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at startup and is read-only afterwards,
//! so it is shared across request handlers without locking.

use std::env;

use tracing::warn;
use url::Url;

use crate::notify::DeepLinkContext;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Base URL of the Gotify server notifications are pushed to
    pub gotify_url: String,

    /// Gotify application token
    pub gotify_token: String,

    /// HTTP request timeout in milliseconds for outbound pushes
    pub request_timeout_ms: u64,

    /// Default Postal web UI host for deep links, used when the webhook
    /// query carries no `host` parameter
    pub postal_web_host: Option<String>,

    /// Default organization slug for deep links
    pub postal_organization: Option<String>,

    /// Default server slug for deep links
    pub postal_server_name: Option<String>,

    /// Log the full rendered notification body at debug level
    pub verbose: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let gotify_token = env::var("GOTIFY_TOKEN").unwrap_or_default();
        if gotify_token.is_empty() {
            warn!("GOTIFY_TOKEN is not set, pushes will be rejected by Gotify");
        }

        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            gotify_url: env::var("GOTIFY_URL")
                .unwrap_or_else(|_| "http://localhost:80".to_string()),

            gotify_token,

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),

            postal_web_host: parse_host("POSTAL_WEB_HOST"),

            postal_organization: env::var("POSTAL_ORGANIZATION").ok(),

            postal_server_name: env::var("POSTAL_SERVER_NAME").ok(),

            verbose: env::var("VERBOSE")
                .ok()
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
        }
    }

    /// Deep-link context from the configured defaults, if all three parts
    /// are set.
    pub fn default_link_context(&self) -> Option<DeepLinkContext> {
        DeepLinkContext::from_parts(
            self.postal_web_host.clone(),
            self.postal_organization.clone(),
            self.postal_server_name.clone(),
        )
    }
}

/// Read an env var that must hold an absolute URL. Invalid values are
/// dropped with a warning rather than carried into deep links.
fn parse_host(name: &str) -> Option<String> {
    let raw = env::var(name).ok()?;

    match Url::parse(&raw) {
        Ok(_) => Some(raw.trim_end_matches('/').to_string()),
        Err(e) => {
            warn!(env_var = name, value = %raw, error = %e, "Invalid URL, ignoring");
            None
        }
    }
}

/// Parse truthy env values ("1", "true", "yes", case-insensitive).
fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
