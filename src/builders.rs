//! Builder patterns for ergonomic construction of A2A types.

use crate::types::*;

/// Builder for constructing [`AgentCard`] with sensible defaults.
///
/// # Example
///
/// ```
/// use a2a_runtime::builders::AgentCardBuilder;
///
/// let card = AgentCardBuilder::new("echo-agent", "Echo Agent", "An example agent", "1.0.0", "http://localhost:8080")
///     .with_skill("chat", "Chat", "Conversational AI", vec!["conversation".to_string()])
///     .with_streaming(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AgentCardBuilder {
    protocol_version: String,
    id: String,
    name: String,
    description: String,
    version: String,
    url: String,
    skills: Vec<AgentSkill>,
    capabilities: AgentCapabilities,
    authentication_schemes: Vec<AuthScheme>,
    provider: Option<AgentProvider>,
}

impl AgentCardBuilder {
    /// Create a new builder with the required fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            protocol_version: "1.0".to_string(),
            id: id.into(),
            name: name.into(),
            description: description.into(),
            version: version.into(),
            url: url.into(),
            skills: Vec::new(),
            capabilities: AgentCapabilities::default(),
            authentication_schemes: Vec::new(),
            provider: None,
        }
    }

    /// Override the advertised protocol version (defaults to `"1.0"`).
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Add a skill to the agent card.
    pub fn with_skill(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        self.skills.push(AgentSkill {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags,
        });
        self
    }

    /// Enable or disable streaming (`tasks/sendSubscribe`/`tasks/resubscribe`) support.
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.capabilities.streaming = enabled;
        self
    }

    /// Enable or disable multi-turn session support.
    pub fn with_sessions(mut self, enabled: bool) -> Self {
        self.capabilities.sessions = enabled;
        self
    }

    /// Enable or disable push-notification webhook support.
    pub fn with_push_notifications(mut self, enabled: bool) -> Self {
        self.capabilities.push_notifications = enabled;
        self
    }

    /// Add an accepted authentication scheme. Order is significant: the auth
    /// middleware attempts extraction in the order schemes are added.
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.authentication_schemes.push(scheme);
        self
    }

    /// Set contact/provider metadata.
    pub fn with_provider(mut self, organization: impl Into<String>, url: impl Into<String>) -> Self {
        self.provider = Some(AgentProvider { organization: organization.into(), url: url.into() });
        self
    }

    /// Build the [`AgentCard`].
    pub fn build(self) -> AgentCard {
        AgentCard {
            protocol_version: self.protocol_version,
            id: self.id,
            name: self.name,
            description: self.description,
            version: self.version,
            url: self.url,
            skills: self.skills,
            capabilities: self.capabilities,
            authentication_schemes: self.authentication_schemes,
            provider: self.provider,
        }
    }
}

/// Builder for constructing [`crate::client::A2AClient`] with custom
/// transport configuration.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use a2a_runtime::builders::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new("http://localhost:7420")
///     .with_timeout(Duration::from_secs(30))
///     .with_bearer_token("test-token")
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "client")]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    timeout: Option<std::time::Duration>,
    headers: std::collections::HashMap<String, String>,
}

#[cfg(feature = "client")]
impl ClientBuilder {
    /// Create a new client builder for the given agent base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), timeout: None, headers: std::collections::HashMap::new() }
    }

    /// Set the request timeout. Defaults to 60 seconds.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a custom HTTP header sent on every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add an `Authorization: Bearer <token>` header.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.headers.insert("Authorization".to_string(), format!("Bearer {}", token.into()));
        self
    }

    /// Add an API key header under a caller-chosen header name.
    pub fn with_api_key(mut self, header_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.headers.insert(header_name.into(), api_key.into());
        self
    }

    fn transport_config(&self) -> crate::client::TransportConfig {
        let mut config = crate::client::TransportConfig::default();
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.headers = self.headers.clone();
        config
    }

    /// Resolve the agent card and build a client targeting its derived
    /// JSON-RPC endpoint.
    pub async fn build(self) -> crate::A2AResult<crate::client::A2AClient> {
        use crate::client::{A2AClient, CardResolver, JsonRpcTransport};
        use crate::utils::constants::DEFAULT_RPC_URL;

        let card = CardResolver::new().resolve(&self.url).await?;
        let base = self.url.trim_end_matches('/');
        let endpoint = format!("{base}{DEFAULT_RPC_URL}");
        let transport = JsonRpcTransport::with_config(endpoint, self.transport_config());
        Ok(A2AClient::with_transport_and_card(Box::new(transport), card))
    }

    /// Build a client from a direct JSON-RPC endpoint URL, skipping agent
    /// card resolution.
    pub fn build_from_endpoint(self) -> crate::client::A2AClient {
        use crate::client::{A2AClient, JsonRpcTransport};

        let transport = JsonRpcTransport::with_config(self.url.clone(), self.transport_config());
        A2AClient::with_transport(Box::new(transport))
    }
}

/// Builder for constructing an A2A axum server with fluent configuration.
///
/// # Example
///
/// ```rust,ignore
/// use a2a_runtime::builders::{AgentCardBuilder, ServerBuilder};
/// use a2a_runtime::server::{InMemoryTaskStore, TaskHandler};
/// use std::sync::Arc;
///
/// # async fn example(handler: Arc<dyn TaskHandler>) {
/// let app = ServerBuilder::new(handler)
///     .with_agent_card(|builder| {
///         builder
///             .with_skill("chat", "Chat", "Conversational AI", vec!["conversation".to_string()])
///             .with_streaming(true)
///     })
///     .with_task_store(Arc::new(InMemoryTaskStore::new()))
///     .build();
/// # }
/// ```
#[cfg(feature = "server")]
pub struct ServerBuilder {
    handler: std::sync::Arc<dyn crate::server::TaskHandler>,
    task_store: Option<std::sync::Arc<dyn crate::server::TaskStore>>,
    agent_card: Option<AgentCard>,
    auth: Option<crate::server::AuthState>,
}

#[cfg(feature = "server")]
impl ServerBuilder {
    /// Create a new server builder with the given task handler.
    pub fn new(handler: std::sync::Arc<dyn crate::server::TaskHandler>) -> Self {
        Self { handler, task_store: None, agent_card: None, auth: None }
    }

    /// Set the task store implementation. Defaults to [`crate::server::InMemoryTaskStore`].
    pub fn with_task_store(mut self, store: std::sync::Arc<dyn crate::server::TaskStore>) -> Self {
        self.task_store = Some(store);
        self
    }

    /// Configure the agent card using a builder callback.
    pub fn with_agent_card<F>(mut self, f: F) -> Self
    where
        F: FnOnce(AgentCardBuilder) -> AgentCardBuilder,
    {
        let builder = AgentCardBuilder::new("a2a-agent", "A2A Agent", "An A2A-compatible agent", "1.0.0", "");
        self.agent_card = Some(f(builder).build());
        self
    }

    /// Set the agent card directly.
    pub fn with_agent_card_direct(mut self, card: AgentCard) -> Self {
        self.agent_card = Some(card);
        self
    }

    /// Require authentication on the protocol routes via the given validator.
    pub fn with_auth(mut self, auth: crate::server::AuthState) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the axum router.
    pub fn build(self) -> axum::Router {
        use crate::server::{a2a_router, InMemoryTaskStore, TaskManager};
        use std::sync::Arc;

        let store = self.task_store.unwrap_or_else(|| Arc::new(InMemoryTaskStore::new()));
        let manager = Arc::new(TaskManager::new(self.handler, store));
        let card = self.agent_card.unwrap_or_else(|| {
            AgentCardBuilder::new("a2a-agent", "A2A Agent", "An A2A-compatible agent", "1.0.0", "").build()
        });

        a2a_router(manager, card, self.auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_card_builder_basic() {
        let card = AgentCardBuilder::new("test-agent", "Test Agent", "A test", "1.0.0", "http://localhost:8080").build();

        assert_eq!(card.id, "test-agent");
        assert_eq!(card.name, "Test Agent");
        assert_eq!(card.description, "A test");
        assert_eq!(card.version, "1.0.0");
        assert_eq!(card.url, "http://localhost:8080");
        assert_eq!(card.protocol_version, "1.0");
    }

    #[test]
    fn agent_card_builder_with_skills() {
        let card = AgentCardBuilder::new("test", "Test", "Test", "1.0.0", "")
            .with_skill("chat", "Chat", "Chat skill", vec!["conversation".to_string()])
            .with_skill("code", "Code", "Code generation", vec!["coding".to_string()])
            .build();

        assert_eq!(card.skills.len(), 2);
        assert_eq!(card.skills[0].id, "chat");
        assert_eq!(card.skills[1].id, "code");
    }

    #[test]
    fn agent_card_builder_with_capabilities() {
        let card = AgentCardBuilder::new("test", "Test", "Test", "1.0.0", "")
            .with_streaming(true)
            .with_push_notifications(false)
            .build();

        assert!(card.capabilities.streaming);
        assert!(!card.capabilities.push_notifications);
    }

    #[cfg(feature = "client")]
    #[test]
    fn client_builder_basic() {
        let builder = ClientBuilder::new("http://localhost:8080")
            .with_timeout(std::time::Duration::from_secs(30))
            .with_bearer_token("test-token");

        assert_eq!(builder.url, "http://localhost:8080");
        assert_eq!(builder.timeout, Some(std::time::Duration::from_secs(30)));
        assert_eq!(builder.headers.get("Authorization"), Some(&"Bearer test-token".to_string()));
    }
}
