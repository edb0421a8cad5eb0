//! Server-Sent Events stream handling for the two streaming methods,
//! `tasks/sendSubscribe` and `tasks/resubscribe`.
//!
//! Parses the wire format emitted by `axum_integration::make_sse_stream`:
//! each event is a JSON-RPC-enveloped `status` or `artifact` payload framed
//! with `id`/`event`/`data` fields, terminated by a final `done` event.
//! Updates and transport/parse errors are delivered on two separate
//! channels so a caller can drain one without the other backing up.

use tokio::sync::mpsc;

use crate::error::A2AError;
use crate::types::{Artifact, JsonRpcResponse, TaskStatus};

use super::cancellation::CancellationToken;

/// One update delivered over a task's event stream.
#[derive(Debug, Clone)]
pub enum StreamUpdate {
    Status(TaskStatus),
    Artifact(Artifact),
}

/// Pull-based handle for the update half of a streaming call.
pub struct UpdateStream {
    rx: mpsc::Receiver<StreamUpdate>,
}

impl UpdateStream {
    pub async fn next(&mut self) -> Option<StreamUpdate> {
        self.rx.recv().await
    }
}

/// Pull-based handle for the error half of a streaming call.
pub struct ErrorStream {
    rx: mpsc::Receiver<A2AError>,
}

impl ErrorStream {
    pub async fn next(&mut self) -> Option<A2AError> {
        self.rx.recv().await
    }
}

/// Spawn a background task that reads `response`'s body as SSE frames,
/// sending parsed updates and errors to their respective channels until the
/// server sends a `done` event, the connection closes, or `cancel` fires.
pub(crate) fn spawn(response: reqwest::Response, cancel: CancellationToken) -> (UpdateStream, ErrorStream) {
    let (update_tx, update_rx) = mpsc::channel(64);
    let (error_tx, error_rx) = mpsc::channel(8);

    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = read_events(response, update_tx, error_tx) => {}
        }
    });

    (UpdateStream { rx: update_rx }, ErrorStream { rx: error_rx })
}

#[derive(Default)]
struct RawEvent {
    event: Option<String>,
    data: String,
}

async fn read_events(
    response: reqwest::Response,
    updates: mpsc::Sender<StreamUpdate>,
    errors: mpsc::Sender<A2AError>,
) {
    use futures::StreamExt;

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut current = RawEvent::default();

    loop {
        let chunk = match stream.next().await {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => {
                let _ = errors.send(A2AError::Transport(format!("error reading SSE stream: {e}"))).await;
                return;
            }
            None => return,
        };

        let text = match std::str::from_utf8(&chunk) {
            Ok(text) => text,
            Err(e) => {
                let _ = errors.send(A2AError::Transport(format!("invalid UTF-8 in SSE stream: {e}"))).await;
                return;
            }
        };
        buffer.push_str(text);

        while let Some(pos) = buffer.find('\n') {
            let line = buffer[..pos].trim_end_matches('\r').to_string();
            buffer = buffer[pos + 1..].to_string();

            if line.is_empty() {
                if current.event.as_deref() == Some("done") {
                    return;
                }
                if !current.data.is_empty() && !dispatch(&current.data, &updates, &errors).await {
                    return;
                }
                current = RawEvent::default();
                continue;
            }
            if line.starts_with(':') {
                continue;
            }
            if let Some(value) = line.strip_prefix("event:") {
                current.event = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("data:") {
                current.data = value.trim().to_string();
            }
            // `id:`/`retry:` fields are framing only; nothing to track client-side.
        }
    }
}

/// Parse one `data:` payload as a JSON-RPC response carrying a `status` or
/// `artifact` result, dispatching to the appropriate channel. Returns
/// `false` if a channel is closed and the read loop should stop.
async fn dispatch(data: &str, updates: &mpsc::Sender<StreamUpdate>, errors: &mpsc::Sender<A2AError>) -> bool {
    let response: JsonRpcResponse = match serde_json::from_str(data) {
        Ok(r) => r,
        Err(e) => {
            return errors
                .send(A2AError::InvalidJson(format!("failed to parse SSE event: {e}")))
                .await
                .is_ok();
        }
    };

    if let Some(err) = response.error {
        return errors
            .send(A2AError::JsonRpc { code: err.code, message: err.message, data: err.data })
            .await
            .is_ok();
    }

    let Some(result) = response.result else {
        return errors
            .send(A2AError::InvalidJson("SSE event has neither 'result' nor 'error'".to_string()))
            .await
            .is_ok();
    };

    if let Some(status) = result.get("status") {
        return match serde_json::from_value::<TaskStatus>(status.clone()) {
            Ok(status) => updates.send(StreamUpdate::Status(status)).await.is_ok(),
            Err(e) => errors.send(A2AError::InvalidJson(format!("invalid status event: {e}"))).await.is_ok(),
        };
    }
    if let Some(artifact) = result.get("artifact") {
        return match serde_json::from_value::<Artifact>(artifact.clone()) {
            Ok(artifact) => updates.send(StreamUpdate::Artifact(artifact)).await.is_ok(),
            Err(e) => errors.send(A2AError::InvalidJson(format!("invalid artifact event: {e}"))).await.is_ok(),
        };
    }
    errors
        .send(A2AError::InvalidJson("SSE event result has neither 'status' nor 'artifact'".to_string()))
        .await
        .is_ok()
}
