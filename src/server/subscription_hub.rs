//! Subscription hub — per-task broadcast topics backing `tasks/sendSubscribe`
//! and `tasks/resubscribe`.
//!
//! Each task gets its own [`TaskTopic`]: a bounded `broadcast` channel plus a
//! monotonic sequence counter used to mint SSE event ids, and a snapshot of
//! the task's current status so a fresh subscriber (or one reconnecting with
//! `Last-Event-ID`) immediately sees where the task stands rather than
//! waiting for the next update.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::warn;

use crate::types::{Artifact, TaskStatus};

const TOPIC_CAPACITY: usize = 1024;

/// The kind of update an event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubEventKind {
    Status,
    Artifact,
}

impl HubEventKind {
    fn as_str(&self) -> &'static str {
        match self {
            HubEventKind::Status => "status",
            HubEventKind::Artifact => "artifact",
        }
    }
}

/// One update broadcast to subscribers of a task, framed as an SSE event
/// with a stable, monotonically increasing id.
#[derive(Debug, Clone)]
pub struct HubEvent {
    pub id: String,
    pub kind: HubEventKind,
    pub task_id: String,
    pub status: Option<TaskStatus>,
    pub artifact: Option<Artifact>,
}

struct TaskTopic {
    tx: broadcast::Sender<HubEvent>,
    seq: AtomicU64,
    last_status: Mutex<Option<TaskStatus>>,
    terminal: AtomicBool,
}

impl TaskTopic {
    fn new() -> Self {
        let (tx, _rx) = broadcast::channel(TOPIC_CAPACITY);
        Self {
            tx,
            seq: AtomicU64::new(0),
            last_status: Mutex::new(None),
            terminal: AtomicBool::new(false),
        }
    }

    fn next_id(&self, task_id: &str, kind: HubEventKind) -> String {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        format!("{task_id}:{}:{seq:020}", kind.as_str())
    }
}

/// Publishes task status/artifact updates to live SSE subscribers and keeps
/// enough state around to answer a reconnecting client with where things
/// stand.
#[derive(Clone)]
pub struct SubscriptionHub {
    topics: Arc<Mutex<HashMap<String, Arc<TaskTopic>>>>,
}

impl SubscriptionHub {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn topic_for(&self, task_id: &str) -> Arc<TaskTopic> {
        let mut topics = self.topics.lock().await;
        topics
            .entry(task_id.to_string())
            .or_insert_with(|| Arc::new(TaskTopic::new()))
            .clone()
    }

    /// Publish a status transition. Marks the topic terminal once a terminal
    /// state is published; further `publish_status`/`publish_artifact` calls
    /// after that still broadcast (a handler that keeps talking after
    /// terminal is a caller bug, not something the hub enforces) but new
    /// subscribers will see `is_terminal() == true`.
    pub async fn publish_status(&self, task_id: &str, status: TaskStatus) {
        let topic = self.topic_for(task_id).await;
        topic.terminal.store(status.state.is_terminal(), Ordering::SeqCst);
        *topic.last_status.lock().await = Some(status.clone());

        let event = HubEvent {
            id: topic.next_id(task_id, HubEventKind::Status),
            kind: HubEventKind::Status,
            task_id: task_id.to_string(),
            status: Some(status),
            artifact: None,
        };
        if topic.tx.send(event).is_err() {
            warn!(task_id, "status update published with no subscribers");
        }
    }

    pub async fn publish_artifact(&self, task_id: &str, artifact: Artifact) {
        let topic = self.topic_for(task_id).await;
        let event = HubEvent {
            id: topic.next_id(task_id, HubEventKind::Artifact),
            kind: HubEventKind::Artifact,
            task_id: task_id.to_string(),
            status: None,
            artifact: Some(artifact),
        };
        if topic.tx.send(event).is_err() {
            warn!(task_id, "artifact update published with no subscribers");
        }
    }

    /// Subscribe to a task's topic. Returns a replay event carrying the
    /// task's current status (so a client connecting for the first time, or
    /// reconnecting via `Last-Event-ID`, doesn't have to wait for the next
    /// transition to know where things stand) plus the live receiver for
    /// everything published from this point on.
    ///
    /// `last_event_id` is accepted but only used to decide *that* a replay
    /// is wanted, not to replay a specific backlog range: the hub's replay
    /// contract is "current status snapshot", not "everything since X".
    pub async fn subscribe(
        &self,
        task_id: &str,
        _last_event_id: Option<&str>,
    ) -> (Option<HubEvent>, broadcast::Receiver<HubEvent>, bool) {
        let topic = self.topic_for(task_id).await;
        let rx = topic.tx.subscribe();
        let terminal = topic.terminal.load(Ordering::SeqCst);
        let replay = topic.last_status.lock().await.clone().map(|status| HubEvent {
            id: topic.next_id(task_id, HubEventKind::Status),
            kind: HubEventKind::Status,
            task_id: task_id.to_string(),
            status: Some(status),
            artifact: None,
        });
        (replay, rx, terminal)
    }

    /// Drop a topic once it will never be subscribed to again. Called by the
    /// task manager after a terminal task has been retained past its
    /// configured lifetime, if ever — the default retention policy keeps
    /// topics for the process lifetime so this is opt-in.
    pub async fn remove(&self, task_id: &str) {
        self.topics.lock().await.remove(task_id);
    }
}

impl Default for SubscriptionHub {
    fn default() -> Self {
        Self::new()
    }
}
