//! High-level A2A client for interacting with remote agents.
//!
//! [`A2AClient`] wraps a [`Transport`] with the typed method surface for the
//! seven JSON-RPC methods an A2A server exposes, generating request ids and
//! unwrapping `result`/`error` envelopes so callers work with plain `Task`/
//! `PushNotificationConfig` values instead of raw JSON-RPC.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{A2AError, A2AResult};
use crate::types::{AgentCard, JsonRpcId, JsonRpcRequest, JsonRpcResponse, Message, PushNotificationConfig, Role, Task};
use crate::utils::constants::DEFAULT_RPC_URL;

use super::cancellation::CancellationToken;
use super::card_resolver::CardResolver;
use super::sse::{ErrorStream, UpdateStream};
use super::transport::{JsonRpcTransport, Transport};

/// Build a message with the given role, a single text part, and the current
/// time as its timestamp. Thin wrapper over [`Message::text`].
pub fn create_text_message(role: Role, text: impl Into<String>) -> Message {
    Message::text(role, text)
}

/// Typed client for the seven methods an A2A server exposes.
///
/// # Example
///
/// ```no_run
/// use a2a_runtime::client::A2AClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = A2AClient::from_url("http://localhost:7420").await?;
/// let task = client.send_text(None, "Hello").await?;
/// println!("task {} is {}", task.id, task.status.state);
/// # Ok(())
/// # }
/// ```
pub struct A2AClient {
    transport: Box<dyn Transport>,
    card: Option<AgentCard>,
    next_id: AtomicI64,
}

impl A2AClient {
    fn new(transport: Box<dyn Transport>, card: Option<AgentCard>) -> Self {
        Self { transport, card, next_id: AtomicI64::new(1) }
    }

    /// Resolve the agent card at `base_url` and build a client targeting the
    /// JSON-RPC endpoint derived as `{base_url}{DEFAULT_RPC_URL}`.
    pub async fn from_url(base_url: &str) -> A2AResult<Self> {
        let card = CardResolver::new().resolve(base_url).await?;
        Ok(Self::from_card(base_url, card))
    }

    /// Build a client from an already-resolved agent card, deriving the
    /// JSON-RPC endpoint as `{base_url}{DEFAULT_RPC_URL}`.
    pub fn from_card(base_url: &str, card: AgentCard) -> Self {
        let base = base_url.trim_end_matches('/');
        let endpoint = format!("{base}{DEFAULT_RPC_URL}");
        Self::new(Box::new(JsonRpcTransport::new(endpoint)), Some(card))
    }

    /// Build a client that talks directly to a JSON-RPC endpoint URL, with no
    /// agent card resolution.
    pub fn from_endpoint(url: impl Into<String>) -> Self {
        Self::new(Box::new(JsonRpcTransport::new(url.into())), None)
    }

    /// Build a client around a caller-supplied transport (e.g. a test fake).
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self::new(transport, None)
    }

    /// Build a client around a caller-supplied transport and an
    /// already-resolved agent card. Used by [`crate::builders::ClientBuilder`]
    /// to apply custom timeout/header configuration while still carrying the
    /// resolved card.
    pub fn with_transport_and_card(transport: Box<dyn Transport>, card: AgentCard) -> Self {
        Self::new(transport, Some(card))
    }

    /// The agent card this client resolved, if any.
    pub fn card(&self) -> Option<&AgentCard> {
        self.card.as_ref()
    }

    fn next_id(&self) -> JsonRpcId {
        JsonRpcId::Number(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> A2AResult<T> {
        let request = JsonRpcRequest::new(method, params, self.next_id())?;
        let response = self.transport.send(&request).await?;
        unwrap_result(response)
    }

    /// `tasks/send`: send a message and block until the task reaches a
    /// terminal or input-required state. `task_id` resumes an existing task
    /// instead of creating a new one; the server fails with `TaskNotFound` or
    /// `TaskNotResumable` as appropriate.
    pub async fn send_task(
        &self,
        task_id: Option<String>,
        session_id: Option<String>,
        message: Message,
    ) -> A2AResult<Task> {
        let params = serde_json::json!({ "taskId": task_id, "sessionId": session_id, "message": message });
        self.call("tasks/send", params).await
    }

    /// Convenience wrapper over [`send_task`](Self::send_task) that always
    /// starts a new task from a plain text message.
    pub async fn send_text(&self, session_id: Option<String>, text: impl Into<String>) -> A2AResult<Task> {
        self.send_task(None, session_id, create_text_message(Role::User, text)).await
    }

    /// Convenience wrapper over [`send_task`](Self::send_task) that resumes
    /// an existing task with a plain text follow-up message.
    pub async fn resume_text(&self, task_id: &str, text: impl Into<String>) -> A2AResult<Task> {
        self.send_task(Some(task_id.to_string()), None, create_text_message(Role::User, text)).await
    }

    /// `tasks/get`: retrieve a task by id.
    pub async fn get_task(&self, task_id: &str) -> A2AResult<Task> {
        let params = serde_json::json!({ "taskId": task_id });
        self.call("tasks/get", params).await
    }

    /// `tasks/cancel`: cancel a running task. Idempotent on the server side.
    pub async fn cancel_task(&self, task_id: &str) -> A2AResult<Task> {
        let params = serde_json::json!({ "taskId": task_id });
        self.call("tasks/cancel", params).await
    }

    /// `tasks/pushNotification/set`: register a webhook for a task's updates.
    pub async fn set_task_push_notification(&self, config: PushNotificationConfig) -> A2AResult<()> {
        let params = serde_json::to_value(&config)?;
        self.call("tasks/pushNotification/set", params).await
    }

    /// `tasks/pushNotification/get`: retrieve a task's registered webhook, if any.
    pub async fn get_task_push_notification(&self, task_id: &str) -> A2AResult<Option<PushNotificationConfig>> {
        let params = serde_json::json!({ "taskId": task_id });
        self.call("tasks/pushNotification/get", params).await
    }

    /// `tasks/sendSubscribe`: send a message and stream status/artifact
    /// updates. `task_id` resumes an existing task, same as [`send_task`](Self::send_task).
    /// `cancel` aborts the request and closes both channels when fired.
    pub async fn send_subscribe(
        &self,
        task_id: Option<String>,
        session_id: Option<String>,
        message: Message,
        cancel: CancellationToken,
    ) -> A2AResult<(UpdateStream, ErrorStream)> {
        let params = serde_json::json!({ "taskId": task_id, "sessionId": session_id, "message": message });
        let request = JsonRpcRequest::new("tasks/sendSubscribe", params, self.next_id())?;
        self.transport.send_stream(&request, None, cancel).await
    }

    /// Convenience wrapper over [`send_subscribe`](Self::send_subscribe) that
    /// always starts a new task from a plain text message.
    pub async fn send_text_stream(
        &self,
        session_id: Option<String>,
        text: impl Into<String>,
        cancel: CancellationToken,
    ) -> A2AResult<(UpdateStream, ErrorStream)> {
        self.send_subscribe(None, session_id, create_text_message(Role::User, text), cancel).await
    }

    /// `tasks/resubscribe`: reattach to a task's update stream, replaying the
    /// current status if `last_event_id` indicates the caller missed it.
    pub async fn resubscribe(
        &self,
        task_id: &str,
        last_event_id: Option<&str>,
        cancel: CancellationToken,
    ) -> A2AResult<(UpdateStream, ErrorStream)> {
        let params = serde_json::json!({ "taskId": task_id });
        let request = JsonRpcRequest::new("tasks/resubscribe", params, self.next_id())?;
        self.transport.send_stream(&request, last_event_id, cancel).await
    }
}

fn unwrap_result<T: DeserializeOwned>(response: JsonRpcResponse) -> A2AResult<T> {
    if let Some(err) = response.error {
        return Err(A2AError::JsonRpc { code: err.code, message: err.message, data: err.data });
    }
    let result = response
        .result
        .ok_or_else(|| A2AError::InvalidJson("response has neither 'result' nor 'error'".to_string()))?;
    serde_json::from_value(result).map_err(|e| A2AError::InvalidJson(format!("failed to parse result: {e}")))
}
