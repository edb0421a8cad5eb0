//! Task updater — the handle a running [`TaskHandler`](super::agent_executor::TaskHandler)
//! uses to publish state transitions and artifacts.
//!
//! Each call persists the change to the task store, broadcasts it to live
//! subscribers via the [`SubscriptionHub`], and fires a push notification if
//! one is registered for the task. Once a terminal state has been published,
//! further status updates are rejected — artifacts, like the teacher's
//! updater, carry no such guard since they can legitimately continue to
//! arrive as a handler wraps up.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::warn;
use uuid::Uuid;

use crate::error::{A2AError, A2AResult};
use crate::types::{Artifact, Message, Part, PushNotificationConfig, Task, TaskState, TaskStatus};

use super::push_dispatcher::{PushDispatcher, PushEvent};
use super::subscription_hub::SubscriptionHub;
use super::task_store::TaskStore;

pub struct TaskUpdater {
    store: Arc<dyn TaskStore>,
    hub: SubscriptionHub,
    push: PushDispatcher,
    push_configs: Arc<RwLock<HashMap<String, PushNotificationConfig>>>,
    task_id: String,
    terminal_reached: Mutex<bool>,
}

impl TaskUpdater {
    pub fn new(
        store: Arc<dyn TaskStore>,
        hub: SubscriptionHub,
        push: PushDispatcher,
        push_configs: Arc<RwLock<HashMap<String, PushNotificationConfig>>>,
        task_id: String,
    ) -> Self {
        Self {
            store,
            hub,
            push,
            push_configs,
            task_id,
            terminal_reached: Mutex::new(false),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub async fn is_terminal(&self) -> bool {
        *self.terminal_reached.lock().await
    }

    async fn load(&self) -> A2AResult<Task> {
        self.store
            .get(&self.task_id)
            .await?
            .ok_or_else(|| A2AError::task_not_found(&self.task_id))
    }

    async fn dispatch_status_push(&self, task: &Task) {
        if let Some(config) = self.push_configs.read().await.get(&self.task_id).cloned() {
            self.push.dispatch(config, PushEvent::Status(task.status.clone()), task.clone());
        }
    }

    /// Dispatches a push for a newly appended artifact. The call itself is
    /// suppressed, not just filtered in the payload, when the registered
    /// config has `include_artifacts` set to false.
    async fn dispatch_artifact_push(&self, task: &Task, artifact: &Artifact) {
        let Some(config) = self.push_configs.read().await.get(&self.task_id).cloned() else {
            return;
        };
        if !config.include_artifacts {
            return;
        }
        self.push.dispatch(config, PushEvent::Artifact(artifact.clone()), task.clone());
    }

    /// Transition to a new state, optionally carrying a message. Rejects the
    /// update if a terminal state has already been published.
    pub async fn update_status(&self, state: TaskState, message: Option<Message>) -> A2AResult<()> {
        {
            let mut terminal = self.terminal_reached.lock().await;
            if *terminal {
                warn!(task_id = %self.task_id, ?state, "status update after terminal state ignored");
                return Err(A2AError::task_not_resumable(format!(
                    "task {} has already reached a terminal state",
                    self.task_id
                )));
            }
            if state.is_terminal() {
                *terminal = true;
            }
        }

        let mut task = self.load().await?;
        if let Some(current_message) = task.status.message.take() {
            task.history.push(current_message);
        }
        task.status = TaskStatus {
            state,
            timestamp: crate::types::now_rfc3339(),
            message,
        };
        self.store.save(task.clone()).await?;
        self.hub.publish_status(&self.task_id, task.status.clone()).await;
        self.dispatch_status_push(&task).await;
        Ok(())
    }

    async fn update_status_text(&self, state: TaskState, text: &str) -> A2AResult<()> {
        let message = Message::text(crate::types::Role::Agent, text);
        self.update_status(state, Some(message)).await
    }

    /// Append an artifact. No terminal-state guard: a handler finishing up
    /// work may still need to attach its last artifact after (or alongside)
    /// the final status update.
    pub async fn add_artifact(&self, part: Part, metadata: Option<serde_json::Value>) -> A2AResult<()> {
        let mut task = self.load().await?;
        let artifact = Artifact {
            id: Uuid::new_v4().to_string(),
            task_id: self.task_id.clone(),
            timestamp: crate::types::now_rfc3339(),
            part,
            metadata,
        };
        task.artifacts.push(artifact.clone());
        self.store.save(task.clone()).await?;
        self.dispatch_artifact_push(&task, &artifact).await;
        self.hub.publish_artifact(&self.task_id, artifact).await;
        Ok(())
    }

    pub async fn start_work(&self) -> A2AResult<()> {
        self.update_status(TaskState::Working, None).await
    }

    pub async fn requires_input(&self, message: Message) -> A2AResult<()> {
        self.update_status(TaskState::InputRequired, Some(message)).await
    }

    pub async fn complete(&self, message: Option<Message>) -> A2AResult<()> {
        self.update_status(TaskState::Completed, message).await
    }

    pub async fn complete_with_text(&self, text: &str) -> A2AResult<()> {
        self.update_status_text(TaskState::Completed, text).await
    }

    pub async fn failed(&self, message: Option<Message>) -> A2AResult<()> {
        self.update_status(TaskState::Failed, message).await
    }

    pub async fn failed_with_text(&self, text: &str) -> A2AResult<()> {
        self.update_status_text(TaskState::Failed, text).await
    }

    /// Transition to `cancelled`. Idempotent: calling this on an already
    /// terminal task returns `Ok(())` without republishing rather than
    /// erroring, since cancellation racing with natural completion is an
    /// expected outcome, not a caller mistake.
    pub async fn cancel(&self) -> A2AResult<()> {
        match self.update_status(TaskState::Cancelled, None).await {
            Ok(()) => Ok(()),
            Err(A2AError::TaskNotResumable { .. }) => Ok(()),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::task_store::InMemoryTaskStore;
    use crate::types::Role;

    async fn updater_with_task() -> (TaskUpdater, Arc<dyn TaskStore>) {
        let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
        let task = Task::new("t1", None, Message::text(Role::User, "hi"));
        store.save(task).await.unwrap();
        let updater = TaskUpdater::new(
            store.clone(),
            SubscriptionHub::new(),
            PushDispatcher::new(),
            Arc::new(RwLock::new(HashMap::new())),
            "t1".to_string(),
        );
        (updater, store)
    }

    #[tokio::test]
    async fn complete_persists_terminal_state() {
        let (updater, store) = updater_with_task().await;
        updater.complete_with_text("done").await.unwrap();
        let task = store.get("t1").await.unwrap().unwrap();
        assert_eq!(task.status.state, TaskState::Completed);
        assert!(updater.is_terminal().await);
    }

    #[tokio::test]
    async fn update_after_terminal_is_rejected() {
        let (updater, _store) = updater_with_task().await;
        updater.complete(None).await.unwrap();
        let result = updater.start_work().await;
        assert!(matches!(result, Err(A2AError::TaskNotResumable { .. })));
    }

    #[tokio::test]
    async fn cancel_after_terminal_is_idempotent() {
        let (updater, _store) = updater_with_task().await;
        updater.complete(None).await.unwrap();
        updater.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn current_status_message_moves_to_history_on_transition() {
        let (updater, store) = updater_with_task().await;
        updater
            .requires_input(Message::text(Role::Agent, "need more info"))
            .await
            .unwrap();
        updater.complete_with_text("done").await.unwrap();
        let task = store.get("t1").await.unwrap().unwrap();
        assert!(task.history.iter().any(|m| m.role == Role::Agent));
    }

    #[tokio::test]
    async fn add_artifact_appends_without_terminal_guard() {
        let (updater, store) = updater_with_task().await;
        updater.complete(None).await.unwrap();
        updater.add_artifact(Part::text("result"), None).await.unwrap();
        let task = store.get("t1").await.unwrap().unwrap();
        assert_eq!(task.artifacts.len(), 1);
    }
}
