//! Task manager — the orchestration core that turns `tasks/send`/
//! `tasks/sendSubscribe`/`tasks/cancel`/`tasks/get`/push-notification-config
//! requests into task state transitions.
//!
//! One [`TaskManager`] is shared by the whole server. It owns the task store,
//! the subscription hub, the push dispatcher, and the push-notification
//! config table, and spawns a detached task per in-flight handler invocation
//! so `tasks/send` callers can either block for a result (`send`) or get a live
//! stream of updates (`send_subscribe`).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::warn;
use uuid::Uuid;

use crate::error::{A2AError, A2AResult};
use crate::types::{Message, PushNotificationConfig, Task, TaskState};

use super::agent_executor::{RequestContext, TaskHandler};
use super::cancellation::CancellationToken;
use super::push_dispatcher::PushDispatcher;
use super::subscription_hub::{HubEvent, SubscriptionHub};
use super::task_store::TaskStore;
use super::task_updater::TaskUpdater;

/// Central orchestrator for the task lifecycle.
pub struct TaskManager {
    handler: Arc<dyn TaskHandler>,
    store: Arc<dyn TaskStore>,
    hub: SubscriptionHub,
    push: PushDispatcher,
    push_configs: Arc<RwLock<HashMap<String, PushNotificationConfig>>>,
    running: Arc<Mutex<HashMap<String, CancellationToken>>>,
}

impl TaskManager {
    pub fn new(handler: Arc<dyn TaskHandler>, store: Arc<dyn TaskStore>) -> Self {
        Self {
            handler,
            store,
            hub: SubscriptionHub::new(),
            push: PushDispatcher::new(),
            push_configs: Arc::new(RwLock::new(HashMap::new())),
            running: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn updater_for(&self, task_id: &str) -> TaskUpdater {
        TaskUpdater::new(
            self.store.clone(),
            self.hub.clone(),
            self.push.clone(),
            self.push_configs.clone(),
            task_id.to_string(),
        )
    }

    /// Create the task record (or, given an existing `task_id`, resume it)
    /// and spawn the handler. Returns the live receiver subscribed *before*
    /// the handler starts running, so the first events it publishes are
    /// never missed.
    ///
    /// With `task_id` absent this always creates a fresh task. With
    /// `task_id` present: the task must exist (`TaskNotFound` otherwise) and
    /// must not already be terminal (`TaskNotResumable` otherwise); the
    /// incoming message is appended to its history and the handler is
    /// invoked again against the now-extended task.
    async fn start(
        &self,
        task_id: Option<String>,
        session_id: Option<String>,
        message: Message,
    ) -> A2AResult<(Task, broadcast::Receiver<HubEvent>)> {
        let (task_id, task) = match task_id {
            Some(id) => {
                let mut existing = self
                    .store
                    .get(&id)
                    .await?
                    .ok_or_else(|| A2AError::task_not_found(&id))?;
                if existing.status.state.is_terminal() {
                    return Err(A2AError::task_not_resumable(format!(
                        "task {id} has already reached a terminal state"
                    )));
                }
                existing.history.push(message.clone());
                self.store.save(existing.clone()).await?;
                (id, existing)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                let task = Task::new(id.clone(), session_id.clone(), message.clone());
                self.store.save(task.clone()).await?;
                (id, task)
            }
        };
        let session_id = task.session_id.clone();

        let (_replay, rx, _terminal) = self.hub.subscribe(&task_id, None).await;

        let token = CancellationToken::new();
        self.running.lock().await.insert(task_id.clone(), token.clone());

        let context = RequestContext {
            task_id: task_id.clone(),
            session_id,
            message,
            task: task.clone(),
            cancellation_token: token,
        };
        let updater = self.updater_for(&task_id);
        let fallback_updater = self.updater_for(&task_id);
        let handler = self.handler.clone();
        let store = self.store.clone();
        let running = self.running.clone();
        let task_id_for_spawn = task_id.clone();

        tokio::spawn(async move {
            if let Err(err) = handler.execute(context, updater).await {
                warn!(task_id = %task_id_for_spawn, error = %err, "handler execute returned an error");
                if let Ok(Some(current)) = store.get(&task_id_for_spawn).await {
                    if !current.status.state.is_terminal() {
                        let _ = fallback_updater.failed_with_text(&err.to_string()).await;
                    }
                }
            }
            running.lock().await.remove(&task_id_for_spawn);
        });

        Ok((task, rx))
    }

    /// `tasks/send`: run the handler to completion (or `input-required`) and
    /// return the resulting task. Blocks the caller; use [`send_subscribe`]
    /// for a live stream instead. `task_id` resumes an existing task rather
    /// than creating a new one (see [`start`](Self::start)).
    pub async fn send(
        &self,
        task_id: Option<String>,
        session_id: Option<String>,
        message: Message,
    ) -> A2AResult<Task> {
        let (task, mut rx) = self.start(task_id, session_id, message).await?;
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(status) = event.status {
                        if status.state.is_terminal() || status.state == TaskState::InputRequired {
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        self.store
            .get(&task.id)
            .await?
            .ok_or_else(|| A2AError::task_not_found(&task.id))
    }

    /// `tasks/sendSubscribe`: create (or resume) the task and return it
    /// immediately alongside a live receiver of status/artifact events.
    pub async fn send_subscribe(
        &self,
        task_id: Option<String>,
        session_id: Option<String>,
        message: Message,
    ) -> A2AResult<(Task, broadcast::Receiver<HubEvent>)> {
        self.start(task_id, session_id, message).await
    }

    pub async fn get(&self, task_id: &str) -> A2AResult<Task> {
        self.store
            .get(task_id)
            .await?
            .ok_or_else(|| A2AError::task_not_found(task_id))
    }

    /// `tasks/resubscribe`: reattach to a task's topic, terminal or not. Returns a
    /// replay event carrying the current status if one has ever been
    /// published, the live receiver, and whether the task has already
    /// reached a terminal state.
    pub async fn resubscribe(
        &self,
        task_id: &str,
        last_event_id: Option<&str>,
    ) -> A2AResult<(Option<HubEvent>, broadcast::Receiver<HubEvent>, bool)> {
        // Resubscribe is allowed on a terminal task; existence is still required.
        self.get(task_id).await?;
        Ok(self.hub.subscribe(task_id, last_event_id).await)
    }

    /// `tasks/cancel`: idempotent. Cancelling an already-terminal task is a
    /// no-op that returns the task as-is rather than an error — a client
    /// racing `tasks/cancel` against natural completion shouldn't see a
    /// spurious failure.
    pub async fn cancel(&self, task_id: &str) -> A2AResult<Task> {
        let task = self.get(task_id).await?;
        if task.status.state.is_terminal() {
            return Ok(task);
        }

        let token = self.running.lock().await.get(task_id).cloned().unwrap_or_default();
        token.cancel();

        let trigger_message = task
            .history
            .last()
            .cloned()
            .unwrap_or_else(|| Message::text(crate::types::Role::System, ""));
        let context = RequestContext {
            task_id: task_id.to_string(),
            session_id: task.session_id.clone(),
            message: trigger_message,
            task: task.clone(),
            cancellation_token: token,
        };

        if let Err(err) = self.handler.cancel(context, self.updater_for(task_id)).await {
            warn!(task_id, error = %err, "handler cancel returned an error");
        }

        // Guarantee a terminal status is reached even if the handler's
        // cancel() didn't publish one itself.
        let current = self.get(task_id).await?;
        if !current.status.state.is_terminal() {
            self.updater_for(task_id).cancel().await?;
        }

        self.running.lock().await.remove(task_id);
        self.get(task_id).await
    }

    pub async fn set_push_config(&self, config: PushNotificationConfig) -> A2AResult<()> {
        self.get(&config.task_id).await?;
        self.push_configs
            .write()
            .await
            .insert(config.task_id.clone(), config);
        Ok(())
    }

    pub async fn get_push_config(&self, task_id: &str) -> A2AResult<Option<PushNotificationConfig>> {
        self.get(task_id).await?;
        Ok(self.push_configs.read().await.get(task_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::task_store::InMemoryTaskStore;
    use crate::types::{Part, Role};
    use async_trait::async_trait;

    struct EchoHandler;

    #[async_trait]
    impl TaskHandler for EchoHandler {
        async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
            let text = context.user_input(" ");
            updater.start_work().await?;
            updater.add_artifact(Part::text(format!("echo: {text}")), None).await?;
            updater.complete_with_text("done").await?;
            Ok(())
        }

        async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
            updater.cancel().await
        }
    }

    struct ResumableHandler;

    #[async_trait]
    impl TaskHandler for ResumableHandler {
        async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
            // history carries just the initiating message on the first turn;
            // a resumed invocation has the follow-up message appended too.
            if context.task.history.len() <= 1 {
                updater
                    .requires_input(Message::text(crate::types::Role::Agent, "need more input"))
                    .await?;
            } else {
                updater.complete_with_text("done").await?;
            }
            Ok(())
        }

        async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
            updater.cancel().await
        }
    }

    struct StuckHandler;

    #[async_trait]
    impl TaskHandler for StuckHandler {
        async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
            updater.start_work().await?;
            context.cancellation_token.cancelled().await;
            Ok(())
        }

        async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2AResult<()> {
            updater.cancel().await
        }
    }

    fn manager(handler: Arc<dyn TaskHandler>) -> TaskManager {
        TaskManager::new(handler, Arc::new(InMemoryTaskStore::new()))
    }

    #[tokio::test]
    async fn send_runs_to_completion() {
        let mgr = manager(Arc::new(EchoHandler));
        let task = mgr.send(None, None, Message::text(Role::User, "hi")).await.unwrap();
        assert_eq!(task.status.state, TaskState::Completed);
        assert_eq!(task.artifacts.len(), 1);
    }

    #[tokio::test]
    async fn send_subscribe_returns_live_events() {
        let mgr = manager(Arc::new(EchoHandler));
        let (task, mut rx) = mgr.send_subscribe(None, None, Message::text(Role::User, "hi")).await.unwrap();
        assert_eq!(task.status.state, TaskState::Submitted);
        let mut saw_completed = false;
        for _ in 0..10 {
            if let Ok(event) = rx.recv().await {
                if let Some(status) = event.status {
                    if status.state == TaskState::Completed {
                        saw_completed = true;
                        break;
                    }
                }
            }
        }
        assert!(saw_completed);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_on_terminal_task() {
        let mgr = manager(Arc::new(EchoHandler));
        let task = mgr.send(None, None, Message::text(Role::User, "hi")).await.unwrap();
        assert!(task.status.state.is_terminal());
        let again = mgr.cancel(&task.id).await.unwrap();
        assert_eq!(again.status.state, TaskState::Completed);
    }

    #[tokio::test]
    async fn cancel_stops_a_running_handler() {
        let mgr = manager(Arc::new(StuckHandler));
        let (task, _rx) = mgr
            .send_subscribe(None, None, Message::text(Role::User, "hi"))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let cancelled = mgr.cancel(&task.id).await.unwrap();
        assert_eq!(cancelled.status.state, TaskState::Cancelled);
    }

    #[tokio::test]
    async fn resubscribe_works_after_terminal() {
        let mgr = manager(Arc::new(EchoHandler));
        let task = mgr.send(None, None, Message::text(Role::User, "hi")).await.unwrap();
        let (replay, _rx, terminal) = mgr.resubscribe(&task.id, None).await.unwrap();
        assert!(terminal);
        assert!(replay.is_some());
    }

    #[tokio::test]
    async fn send_with_existing_task_id_resumes_and_appends_history() {
        let mgr = manager(Arc::new(ResumableHandler));
        let task = mgr.send(None, None, Message::text(Role::User, "first")).await.unwrap();
        assert_eq!(task.status.state, TaskState::InputRequired);

        let resumed = mgr
            .send(Some(task.id.clone()), None, Message::text(Role::User, "second"))
            .await
            .unwrap();
        assert_eq!(resumed.status.state, TaskState::Completed);
        assert!(resumed.history.iter().any(|m| m.role == Role::User
            && crate::utils::get_message_text(m, " ") == "second"));
    }

    #[tokio::test]
    async fn send_with_unknown_task_id_returns_task_not_found() {
        let mgr = manager(Arc::new(EchoHandler));
        let err = mgr
            .send(Some("missing".to_string()), None, Message::text(Role::User, "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, A2AError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn send_with_terminal_task_id_returns_task_not_resumable() {
        let mgr = manager(Arc::new(EchoHandler));
        let task = mgr.send(None, None, Message::text(Role::User, "hi")).await.unwrap();
        assert!(task.status.state.is_terminal());
        let err = mgr
            .send(Some(task.id.clone()), None, Message::text(Role::User, "again"))
            .await
            .unwrap_err();
        assert!(matches!(err, A2AError::TaskNotResumable { .. }));
    }

    #[tokio::test]
    async fn get_missing_task_errors() {
        let mgr = manager(Arc::new(EchoHandler));
        let result = mgr.get("missing").await;
        assert!(matches!(result, Err(A2AError::TaskNotFound { .. })));
    }

    #[tokio::test]
    async fn push_config_round_trips() {
        let mgr = manager(Arc::new(EchoHandler));
        let task = mgr.send(None, None, Message::text(Role::User, "hi")).await.unwrap();
        let config = PushNotificationConfig {
            task_id: task.id.clone(),
            url: "https://example.com/hook".to_string(),
            authentication: None,
            include_task_data: true,
            include_artifacts: false,
        };
        mgr.set_push_config(config.clone()).await.unwrap();
        let fetched = mgr.get_push_config(&task.id).await.unwrap();
        assert_eq!(fetched, Some(config));
    }
}
