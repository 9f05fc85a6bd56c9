use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::{DEFAULT_CHAT_BASE_URL, DEFAULT_RESOURCES_BASE_URL};

/// Transport configuration for chat and resources requests.
#[derive(Debug, Clone)]
pub struct AgentApiConfig {
    /// Base URL for the chat surface (conversations, stream, feedback).
    pub chat_base_url: String,
    /// Base URL for the resources surface (orgs, projects, agents).
    pub resources_base_url: String,
    /// Caller identity recorded in feedback submissions.
    pub user_id: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for AgentApiConfig {
    fn default() -> Self {
        Self {
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            resources_base_url: DEFAULT_RESOURCES_BASE_URL.to_string(),
            user_id: "anonymous".to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl AgentApiConfig {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn with_chat_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.chat_base_url = base_url.into();
        self
    }

    pub fn with_resources_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.resources_base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::AgentApiConfig;
    use std::time::Duration;

    #[test]
    fn default_config_targets_hosted_backends() {
        let config = AgentApiConfig::default();
        assert!(config.chat_base_url.starts_with("https://"));
        assert!(config.resources_base_url.starts_with("https://"));
        assert_eq!(config.user_id, "anonymous");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn builder_chain_overrides_fields() {
        let config = AgentApiConfig::new("member-7")
            .with_chat_base_url("https://chat.internal")
            .with_resources_base_url("https://resources.internal")
            .with_user_agent("agent-chat-tests")
            .with_timeout(Duration::from_secs(5))
            .insert_header("x-trace", "on");

        assert_eq!(config.user_id, "member-7");
        assert_eq!(config.chat_base_url, "https://chat.internal");
        assert_eq!(config.resources_base_url, "https://resources.internal");
        assert_eq!(config.user_agent.as_deref(), Some("agent-chat-tests"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.extra_headers.get("x-trace").map(String::as_str), Some("on"));
    }
}
