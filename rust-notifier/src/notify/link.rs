//! Deep-link construction back into the Postal web UI.

/// Context needed to build a deep link into the Postal web interface.
///
/// A link is built only when all three parts are known AND the event
/// carries a message id; otherwise the notification has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkContext {
    /// Base URL of the Postal web UI, e.g. "https://postal.example.com"
    pub host: String,
    /// Organization slug
    pub organization: String,
    /// Server slug
    pub server_name: String,
}

impl DeepLinkContext {
    /// Build a context only when all three parts are present.
    pub fn from_parts(
        host: Option<String>,
        organization: Option<String>,
        server_name: Option<String>,
    ) -> Option<Self> {
        match (host, organization, server_name) {
            (Some(host), Some(organization), Some(server_name)) => Some(Self {
                host,
                organization,
                server_name,
            }),
            _ => None,
        }
    }

    /// URL of the message page for `message_id`, with an optional path
    /// appendix such as "/activity".
    pub fn message_url(&self, message_id: i64, appendix: &str) -> String {
        format!(
            "{}/org/{}/servers/{}/messages/{}{}",
            self.host, self.organization, self.server_name, message_id, appendix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testing_context() -> DeepLinkContext {
        DeepLinkContext {
            host: "https://testing.example.com".to_string(),
            organization: "testing-org".to_string(),
            server_name: "testing-server".to_string(),
        }
    }

    #[test]
    fn test_message_url() {
        let url = testing_context().message_url(12345, "");

        assert_eq!(
            url,
            "https://testing.example.com/org/testing-org/servers/testing-server/messages/12345"
        );
    }

    #[test]
    fn test_message_url_with_appendix() {
        let url = testing_context().message_url(7, "/activity");

        assert_eq!(
            url,
            "https://testing.example.com/org/testing-org/servers/testing-server/messages/7/activity"
        );
    }

    #[test]
    fn test_from_parts_requires_all_three() {
        assert!(DeepLinkContext::from_parts(
            Some("h".to_string()),
            Some("o".to_string()),
            Some("n".to_string())
        )
        .is_some());

        assert!(DeepLinkContext::from_parts(
            Some("h".to_string()),
            None,
            Some("n".to_string())
        )
        .is_none());
        assert!(DeepLinkContext::from_parts(None, None, None).is_none());
    }
}
