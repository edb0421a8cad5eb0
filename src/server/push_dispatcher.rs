//! Push dispatcher — best-effort webhook delivery of task updates.
//!
//! Delivery is fire-and-forget: a failing webhook is logged and otherwise
//! invisible to the client that called `tasks/send`. The dispatcher never
//! surfaces a delivery failure as a JSON-RPC error.

use std::time::Duration;

use tracing::warn;

use crate::types::{Artifact, PushNotificationAuth, PushNotificationConfig, Task, TaskStatus};

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The single triggering status transition or artifact that a dispatch call
/// carries. Exactly one of these backs each webhook POST — never a bulk dump
/// of the task's whole status/artifacts.
#[derive(Debug, Clone)]
pub enum PushEvent {
    Status(TaskStatus),
    Artifact(Artifact),
}

/// Sends webhook notifications for task updates per a task's registered
/// [`PushNotificationConfig`].
#[derive(Clone)]
pub struct PushDispatcher {
    client: reqwest::Client,
}

impl PushDispatcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DISPATCH_TIMEOUT)
            .build()
            .expect("reqwest client construction should not fail with default settings");
        Self { client }
    }

    /// Dispatch a single task update (a status transition or an artifact) to
    /// `config.url`. Callers are responsible for not calling this at all for
    /// artifact events when `config.include_artifacts` is false — the
    /// dispatcher itself only controls whether the full task snapshot rides
    /// along (`include_task_data`). Spawns the actual HTTP call so the caller
    /// (the task updater, mid status-transition) never blocks on webhook
    /// delivery.
    pub fn dispatch(&self, config: PushNotificationConfig, event: PushEvent, task: Task) {
        let client = self.client.clone();
        tokio::spawn(async move {
            let body = build_payload(&config, &event, &task);
            let mut request = client.post(&config.url).json(&body);
            request = match &config.authentication {
                Some(PushNotificationAuth::Bearer { token }) => {
                    request.bearer_auth(token)
                }
                Some(PushNotificationAuth::Header { name, value }) => request.header(name, value),
                None => request,
            };

            match request.send().await {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => {
                    warn!(
                        task_id = %task.id,
                        url = %config.url,
                        status = %resp.status(),
                        "push notification rejected by endpoint"
                    );
                }
                Err(err) => {
                    warn!(
                        task_id = %task.id,
                        url = %config.url,
                        error = %err,
                        "push notification delivery failed"
                    );
                }
            }
        });
    }
}

impl Default for PushDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn build_payload(config: &PushNotificationConfig, event: &PushEvent, task: &Task) -> serde_json::Value {
    let mut payload = match event {
        PushEvent::Status(status) => serde_json::json!({
            "taskId": task.id,
            "eventType": "status",
            "status": status,
        }),
        PushEvent::Artifact(artifact) => serde_json::json!({
            "taskId": task.id,
            "eventType": "artifact",
            "artifact": artifact,
        }),
    };

    if config.include_task_data {
        payload["task"] = serde_json::to_value(task).unwrap_or(serde_json::Value::Null);
    }

    payload
}
