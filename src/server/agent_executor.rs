//! Agent handler trait — the core integration point for agent logic.
//!
//! Implementors provide the actual agent logic: reading from a
//! [`RequestContext`] and publishing events (status updates, artifacts,
//! messages) to the [`TaskUpdater`](super::task_updater::TaskUpdater) handed
//! to them by the task manager.

use async_trait::async_trait;

use crate::error::A2AResult;
use crate::types::{Message, Task};

use super::cancellation::CancellationToken;
use super::task_updater::TaskUpdater;

/// Context for an agent execution request.
///
/// Contains everything a handler needs to process one invocation: the task
/// identifiers, the incoming message, the existing task (on a resumed
/// `input-required` task), and a cancellation token the handler should poll
/// or select against during long-running work.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this task.
    pub task_id: String,

    /// Caller-supplied correlation id, if any.
    pub session_id: Option<String>,

    /// The incoming message that triggered this execution.
    pub message: Message,

    /// The task as it stood when execution was dispatched.
    pub task: Task,

    /// Signalled when the client calls `tasks/cancel` for this task. Handlers
    /// doing long-running work should race this against their work and stop
    /// promptly when it fires; a handler that ignores it simply runs to
    /// completion and the task is marked cancelled anyway once it returns.
    pub cancellation_token: CancellationToken,
}

impl RequestContext {
    /// Extracts and joins all text parts from the incoming message.
    pub fn user_input(&self, delimiter: &str) -> String {
        self.message
            .parts
            .iter()
            .filter_map(|part| match part {
                crate::types::Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

/// Core trait for agent execution logic.
///
/// Implement this to define an agent's behavior. The task manager calls
/// [`execute`](TaskHandler::execute) for `tasks/send`/`tasks/sendSubscribe` and
/// [`cancel`](TaskHandler::cancel) when a client calls `tasks/cancel`.
///
/// # Examples
///
/// ```rust,ignore
/// use a2a_runtime::server::{TaskHandler, RequestContext, TaskUpdater};
/// use a2a_runtime::error::A2AResult;
/// use async_trait::async_trait;
///
/// struct EchoAgent;
///
/// #[async_trait]
/// impl TaskHandler for EchoAgent {
///     async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
///         let text = context.user_input(" ");
///         updater.complete_with_text(&format!("Echo: {text}")).await?;
///         Ok(())
///     }
///
///     async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
///         updater.cancel().await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Run the agent's logic for a task. The handler publishes state
    /// transitions and artifacts through `updater`; it should return once
    /// the task reaches a terminal state or `input-required`.
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()>;

    /// Requested when a client cancels a running task. Implementations that
    /// have no cleanup to do can simply call `updater.cancel()`.
    async fn cancel(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()>;
}
