//! A2A server framework — traits and implementations for building A2A agents.
//!
//! - [`TaskHandler`] trait — implement your agent logic
//! - [`RequestContext`] — execution context with task id, message, cancellation token
//! - [`CancellationToken`] — cooperative cancellation signal
//! - [`TaskStore`] trait + [`InMemoryTaskStore`] — task persistence
//! - [`TaskUpdater`] — publishes status transitions and artifacts
//! - [`SubscriptionHub`] — per-task broadcast topics backing SSE streaming
//! - [`PushDispatcher`] — best-effort webhook delivery
//! - [`AuthValidator`]/[`auth_middleware`] — pluggable request authentication
//! - [`TaskManager`] — orchestrates the full task lifecycle
//! - [`a2a_router`] — ready-made axum routes for an A2A server
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use a2a_runtime::server::*;
//! use a2a_runtime::types::AgentCard;
//!
//! struct EchoAgent;
//!
//! #[async_trait::async_trait]
//! impl TaskHandler for EchoAgent {
//!     async fn execute(&self, ctx: RequestContext, updater: TaskUpdater) -> a2a_runtime::A2AResult<()> {
//!         updater.start_work().await?;
//!         updater.complete_with_text(&format!("Echo: {}", ctx.user_input(" "))).await?;
//!         Ok(())
//!     }
//!
//!     async fn cancel(&self, _ctx: RequestContext, updater: TaskUpdater) -> a2a_runtime::A2AResult<()> {
//!         updater.cancel().await
//!     }
//! }
//!
//! let handler: Arc<dyn TaskHandler> = Arc::new(EchoAgent);
//! let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
//! let manager = Arc::new(TaskManager::new(handler, store));
//! let app = a2a_router(manager, agent_card, None);
//! ```

pub mod agent_executor;
pub mod auth;
pub mod axum_integration;
pub mod cancellation;
pub mod push_dispatcher;
pub mod subscription_hub;
pub mod task_manager;
pub mod task_store;
pub mod task_updater;

pub use agent_executor::{RequestContext, TaskHandler};
pub use auth::{auth_middleware, AuthState, AuthValidator, ExtractedAuth};
pub use axum_integration::a2a_router;
pub use cancellation::CancellationToken;
pub use push_dispatcher::PushDispatcher;
pub use subscription_hub::{HubEvent, HubEventKind, SubscriptionHub};
pub use task_manager::TaskManager;
pub use task_store::{InMemoryTaskStore, TaskStore};
pub use task_updater::TaskUpdater;
