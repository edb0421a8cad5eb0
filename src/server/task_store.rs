//! Task store — persistence layer for A2A tasks.
//!
//! The task store is responsible for persisting and retrieving [`Task`]
//! objects. [`InMemoryTaskStore`] is provided for development and testing;
//! production deployments should implement the [`TaskStore`] trait backed by
//! a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::A2AResult;
use crate::types::Task;

/// Trait for persisting and retrieving A2A tasks.
///
/// Implementations must be `Send + Sync` for use in async server contexts.
///
/// # Provided implementations
///
/// - [`InMemoryTaskStore`] — simple in-memory store (data lost on restart)
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Save or update a task in the store. Overwrites any existing task with
    /// the same ID.
    async fn save(&self, task: Task) -> A2AResult<()>;

    /// Retrieve a task by its ID. Returns `None` if the task does not exist.
    async fn get(&self, task_id: &str) -> A2AResult<Option<Task>>;

    /// Delete a task by its ID. Silently succeeds if it does not exist.
    async fn delete(&self, task_id: &str) -> A2AResult<()>;
}

/// In-memory task store backed by a `HashMap`.
///
/// Suitable for development, testing, and short-lived server instances. All
/// task data is lost when the process exits.
#[derive(Debug)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<String, Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn save(&self, task: Task) -> A2AResult<()> {
        let task_id = task.id.clone();
        let mut tasks = self.tasks.write().await;
        let is_new = !tasks.contains_key(&task_id);
        tasks.insert(task_id.clone(), task);
        debug!(task_id = %task_id, is_new, "task saved");
        Ok(())
    }

    async fn get(&self, task_id: &str) -> A2AResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        let task = tasks.get(task_id).cloned();
        debug!(task_id = %task_id, found = task.is_some(), "task lookup");
        Ok(task)
    }

    async fn delete(&self, task_id: &str) -> A2AResult<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.remove(task_id).is_some() {
            debug!(task_id = %task_id, "task deleted");
        } else {
            warn!(task_id = %task_id, "attempted to delete non-existent task");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Message, Role};

    #[tokio::test]
    async fn save_and_get_round_trips() {
        let store = InMemoryTaskStore::new();
        let task = Task::new("t1", None, Message::text(Role::User, "hi"));
        store.save(task.clone()).await.unwrap();
        let loaded = store.get("t1").await.unwrap().unwrap();
        assert_eq!(loaded.id, task.id);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = InMemoryTaskStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_is_not_an_error() {
        let store = InMemoryTaskStore::new();
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn save_overwrites_existing_task() {
        let store = InMemoryTaskStore::new();
        let mut task = Task::new("t1", None, Message::text(Role::User, "hi"));
        store.save(task.clone()).await.unwrap();
        task.session_id = Some("s1".to_string());
        store.save(task).await.unwrap();
        let loaded = store.get("t1").await.unwrap().unwrap();
        assert_eq!(loaded.session_id, Some("s1".to_string()));
    }
}
