//! Utility functions for creating A2A Task objects.

use crate::error::{A2AError, A2AResult};
use crate::types::{Artifact, Message, Part, Task, TaskState, TaskStatus};
use uuid::Uuid;

/// Creates a new, freshly `submitted` Task from an initial message.
///
/// # Errors
///
/// Returns an error if the message has no parts, or any text Part is empty.
///
/// # Example
///
/// ```
/// use a2a_runtime::types::{Message, Role};
/// use a2a_runtime::utils::new_task;
///
/// let message = Message::text(Role::User, "Hello");
/// let task = new_task(None, message).unwrap();
/// assert_eq!(task.status.state, a2a_runtime::types::TaskState::Submitted);
/// ```
pub fn new_task(session_id: Option<String>, message: Message) -> A2AResult<Task> {
    if message.parts.is_empty() {
        return Err(A2AError::invalid_params("message parts cannot be empty"));
    }
    for part in &message.parts {
        if let Part::Text { text } = part {
            if text.is_empty() {
                return Err(A2AError::invalid_params("text part content cannot be empty"));
            }
        }
    }

    Ok(Task::new(Uuid::new_v4().to_string(), session_id, message))
}

/// Creates a Task object already in the `completed` state.
///
/// Useful for constructing a final Task representation directly, e.g. in
/// tests or for handlers that finish synchronously.
///
/// # Errors
///
/// Returns an error if `artifacts` is empty.
///
/// # Example
///
/// ```
/// use a2a_runtime::utils::{completed_task, new_text_artifact};
///
/// let artifact = new_text_artifact("task-123", "Task complete");
/// let task = completed_task("task-123", None, vec![artifact], vec![]).unwrap();
/// assert_eq!(task.status.state, a2a_runtime::types::TaskState::Completed);
/// ```
pub fn completed_task(
    task_id: impl Into<String>,
    session_id: Option<String>,
    artifacts: Vec<Artifact>,
    history: Vec<Message>,
) -> A2AResult<Task> {
    if artifacts.is_empty() {
        return Err(A2AError::invalid_params(
            "artifacts must be a non-empty list of Artifact objects",
        ));
    }

    Ok(Task {
        id: task_id.into(),
        session_id,
        status: TaskStatus::new(TaskState::Completed),
        history,
        artifacts,
    })
}
