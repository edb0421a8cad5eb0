//! Shared test fixtures for integration tests: agents, a real HTTP server,
//! and small JSON-RPC request builders.

#![allow(dead_code)]

use std::sync::Arc;

use a2a_runtime::builders::AgentCardBuilder;
use a2a_runtime::error::{A2AError, A2AResult};
use a2a_runtime::server::{a2a_router, InMemoryTaskStore, RequestContext, TaskHandler, TaskManager, TaskStore, TaskUpdater};
use a2a_runtime::types::{AgentCard, Part};
use async_trait::async_trait;

/// Echoes the user's text back as the completed task's final message.
pub struct EchoAgent;

#[async_trait]
impl TaskHandler for EchoAgent {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        let text = context.user_input(" ");
        let text = if text.is_empty() { "no text received".to_string() } else { text };
        updater.start_work().await?;
        updater.complete_with_text(&format!("Echo: {text}")).await?;
        Ok(())
    }

    async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        updater.cancel().await
    }
}

/// Publishes an artifact and an intermediate status before completing, so
/// streaming tests have more than one event to observe.
pub struct SlowEchoAgent;

#[async_trait]
impl TaskHandler for SlowEchoAgent {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        let text = context.user_input(" ");
        updater.start_work().await?;
        updater.add_artifact(Part::text(format!("processed: {text}")), None).await?;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        updater.complete_with_text(&format!("done: {text}")).await?;
        Ok(())
    }

    async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        updater.cancel().await
    }
}

/// Always fails; used to exercise the task manager's failure path.
pub struct FailingAgent;

#[async_trait]
impl TaskHandler for FailingAgent {
    async fn execute(&self, _context: RequestContext, _updater: TaskUpdater) -> A2AResult<()> {
        Err(A2AError::internal_error("agent intentionally failed"))
    }

    async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        updater.cancel().await
    }
}

/// Asks for more input on the first turn, then completes once resumed.
pub struct ResumableAgent;

#[async_trait]
impl TaskHandler for ResumableAgent {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        if context.task.history.len() <= 1 {
            updater.requires_input(a2a_runtime::utils::new_agent_text_message("what else?")).await?;
        } else {
            let text = context.user_input(" ");
            updater.complete_with_text(&format!("resumed: {text}")).await?;
        }
        Ok(())
    }

    async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        updater.cancel().await
    }
}

/// Never reaches a terminal state on its own; only stops when cancelled.
pub struct StuckAgent;

#[async_trait]
impl TaskHandler for StuckAgent {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        updater.start_work().await?;
        context.cancellation_token.cancelled().await;
        Ok(())
    }

    async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
        updater.cancel().await
    }
}

pub fn test_agent_card(url: &str) -> AgentCard {
    AgentCardBuilder::new("test-echo-agent", "Test Echo Agent", "An echo agent used in integration tests", "0.1.0", url)
        .with_streaming(true)
        .with_skill("echo", "Echo", "Echoes back messages", vec!["test".to_string()])
        .build()
}

/// Start a real HTTP server on an OS-assigned port with the given handler.
/// Returns the base URL and a join handle that can be aborted on teardown.
pub async fn start_test_server(handler: Arc<dyn TaskHandler>) -> (String, tokio::task::JoinHandle<()>) {
    start_test_server_with_store(handler, Arc::new(InMemoryTaskStore::new())).await
}

pub async fn start_test_server_with_store(
    handler: Arc<dyn TaskHandler>,
    store: Arc<dyn TaskStore>,
) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let manager = Arc::new(TaskManager::new(handler, store));
    let card = test_agent_card(&base_url);
    let app = a2a_router(manager, card, None);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    (base_url, handle)
}

pub fn jsonrpc_request(id: serde_json::Value, method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params })
}

pub fn send_task_request(id: i64, text: &str) -> serde_json::Value {
    jsonrpc_request(
        serde_json::json!(id),
        "tasks/send",
        serde_json::json!({
            "message": {
                "role": "user",
                "parts": [{"type": "text", "text": text}],
                "timestamp": "2024-01-01T00:00:00Z",
            }
        }),
    )
}
