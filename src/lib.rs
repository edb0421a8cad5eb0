//! # a2a-runtime — Agent-to-Agent (A2A) protocol runtime
//!
//! A server-side framework that accepts JSON-RPC 2.0 requests from remote
//! clients, drives long-running "tasks" through a state machine, streams
//! incremental progress to subscribers over Server-Sent Events (SSE), and
//! delivers status/artifact updates to externally configured HTTP webhooks
//! ("push notifications"). A matching client library sends and subscribes
//! to tasks.
//!
//! ## Overview
//!
//! - The **task lifecycle engine**: state machine, concurrent handler
//!   invocation, ordered update propagation ([`server::TaskManager`]).
//! - The **subscription fan-out**: binding a per-task producer to an
//!   arbitrary number of concurrent SSE subscribers with resumption
//!   semantics ([`server::SubscriptionHub`]).
//! - The **push-notification dispatcher**: best-effort webhook delivery with
//!   authentication injection and selective payload inclusion
//!   ([`server::PushDispatcher`]).
//! - The **JSON-RPC dispatch layer**: method routing, parameter binding,
//!   error taxonomy, and HTTP-status mapping ([`server::a2a_router`]).
//! - A matching **client library** ([`client::A2AClient`]).
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `client` | yes     | HTTP client for calling A2A agents (reqwest + SSE) |
//! | `server` | yes     | Server traits + axum integration for building agents |
//! | `full`   | no      | Enable all features |
//!
//! ## Quick Start: Client
//!
//! ```no_run
//! use a2a_runtime::client::{A2AClient, CancellationToken, StreamUpdate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to an A2A agent (auto-discovers its endpoint from its card)
//!     let client = A2AClient::from_url("http://localhost:7420").await?;
//!
//!     // Send a text message and block until the task reaches a terminal state
//!     let task = client.send_text(None, "Write a haiku about Rust").await?;
//!     println!("Task: {} (status: {})", task.id, task.status.state);
//!
//!     // Or stream updates as the handler runs
//!     let cancel = CancellationToken::new();
//!     let (mut updates, mut errors) = client.send_text_stream(None, "Tell me a story", cancel).await?;
//!     while let Some(update) = updates.next().await {
//!         match update {
//!             StreamUpdate::Status(status) => println!("Status: {}", status.state),
//!             StreamUpdate::Artifact(artifact) => println!("Artifact: {}", artifact.id),
//!         }
//!     }
//!     while let Some(err) = errors.next().await {
//!         eprintln!("stream error: {err}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Quick Start: Server
//!
//! Implement [`server::TaskHandler`] to define your agent's behavior:
//!
//! ```rust,ignore
//! use a2a_runtime::server::{RequestContext, TaskHandler, TaskUpdater};
//! use a2a_runtime::error::A2AResult;
//! use async_trait::async_trait;
//!
//! struct EchoAgent;
//!
//! #[async_trait]
//! impl TaskHandler for EchoAgent {
//!     async fn execute(&self, ctx: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
//!         updater.start_work().await?;
//!         updater.complete_with_text(&format!("Echo: {}", ctx.user_input(" "))).await?;
//!         Ok(())
//!     }
//!
//!     async fn cancel(&self, _ctx: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
//!         updater.cancel().await
//!     }
//! }
//! ```
//!
//! Then set up the HTTP server:
//!
//! ```rust,ignore
//! use a2a_runtime::builders::AgentCardBuilder;
//! use a2a_runtime::server::{a2a_router, InMemoryTaskStore, TaskManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent_card = AgentCardBuilder::new("echo-agent", "Echo Agent", "Echoes messages back", "1.0.0", "http://localhost:3000")
//!         .with_streaming(true)
//!         .build();
//!
//!     let handler = Arc::new(EchoAgent);
//!     let store = Arc::new(InMemoryTaskStore::new());
//!     let manager = Arc::new(TaskManager::new(handler, store));
//!
//!     let app = a2a_router(manager, agent_card, None);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! The server exposes:
//! - `POST /a2a` — `tasks/send` / `tasks/get` / `tasks/cancel` / `tasks/pushNotification/set` / `tasks/pushNotification/get`
//! - `POST /a2a/sse` — `tasks/sendSubscribe` / `tasks/resubscribe`
//! - `GET /.well-known/agent.json` — agent card discovery (unauthenticated)
//!
//! ## Architecture
//!
//! ### Client
//!
//! - [`client::A2AClient`] — high-level client with typed methods for every A2A operation
//! - [`client::CardResolver`] — discovers agent cards from `/.well-known/agent.json`
//! - [`client::JsonRpcTransport`] — HTTP transport with JSON-RPC 2.0 encoding
//! - [`client::UpdateStream`] / [`client::ErrorStream`] — SSE event channels for streaming calls
//!
//! ### Server
//!
//! - [`server::TaskHandler`] — trait for implementing your agent's logic
//! - [`server::TaskManager`] — orchestrates the task lifecycle
//! - [`server::TaskStore`] — trait for task persistence
//! - [`server::InMemoryTaskStore`] — in-memory task store implementation
//! - [`server::SubscriptionHub`] — per-task broadcast backing SSE streaming
//! - [`server::PushDispatcher`] — best-effort webhook delivery
//! - [`server::TaskUpdater`] — publishes status transitions and artifacts
//! - [`server::a2a_router`] — creates an axum `Router` with A2A routes
//!
//! ### Core Types
//!
//! - [`types::Task`] — an A2A task with status, history, and artifacts
//! - [`types::Message`] — a message with text/file/data parts
//! - [`types::Part`] — content part (text, file, or structured data)
//! - [`types::TaskState`] — task lifecycle state machine
//! - [`types::AgentCard`] — agent metadata and capabilities
//! - [`error::A2AError`] — error types with JSON-RPC error codes

pub mod builders;
pub mod error;
pub mod types;
pub mod utils;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod server;

/// Prelude module that re-exports commonly used types and traits.
///
/// Import this module with `use a2a_runtime::prelude::*;` to get access to
/// the most frequently used types without having to import them individually.
pub mod prelude {
    // Core types
    pub use crate::types::{
        AgentCapabilities, AgentCard, AgentProvider, AgentSkill, Artifact, AuthScheme, Message,
        Part, PushNotificationAuth, PushNotificationConfig, Role, Task, TaskState, TaskStatus,
    };

    // Error types
    pub use crate::error::{A2AError, A2AResult};

    // Builders
    pub use crate::builders::AgentCardBuilder;

    #[cfg(feature = "client")]
    pub use crate::builders::ClientBuilder;

    #[cfg(feature = "client")]
    pub use crate::client::A2AClient;

    #[cfg(feature = "server")]
    pub use crate::builders::ServerBuilder;

    #[cfg(feature = "server")]
    pub use crate::server::{
        a2a_router, InMemoryTaskStore, RequestContext, TaskHandler, TaskManager, TaskStore,
        TaskUpdater,
    };
}

// Re-export core types at crate root for convenience.
pub use builders::AgentCardBuilder;
pub use error::{A2AError, A2AResult};
pub use types::*;

#[cfg(feature = "client")]
pub use builders::ClientBuilder;

#[cfg(feature = "server")]
pub use builders::ServerBuilder;
