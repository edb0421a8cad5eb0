//! Axum integration — ready-made HTTP routes for an A2A server.
//!
//! - `GET /.well-known/agent.json` — agent card discovery (unauthenticated)
//! - `POST /a2a` — JSON-RPC 2.0 dispatch for the request/response methods
//! - `POST /a2a/sse` — JSON-RPC 2.0 dispatch for the two streaming methods
//!
//! # Methods
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/a2a` | `tasks/send` | Send a message, block until terminal/input-required |
//! | `/a2a` | `tasks/get` | Retrieve a task by id |
//! | `/a2a` | `tasks/cancel` | Cancel a running task (idempotent) |
//! | `/a2a` | `tasks/pushNotification/set` | Register a webhook for task updates |
//! | `/a2a` | `tasks/pushNotification/get` | Retrieve a task's webhook config |
//! | `/a2a/sse` | `tasks/sendSubscribe` | Send a message, stream updates via SSE |
//! | `/a2a/sse` | `tasks/resubscribe` | Reattach to a task's update stream |
//!
//! Unlike a plain JSON-RPC server that always answers `200`, this dispatcher
//! maps each [`A2AError`] to its [`http_status`](A2AError::http_status) so
//! clients and proxies see a meaningful status line.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use futures::stream::Stream;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use crate::error::A2AError;
use crate::types::{
    AgentCard, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, Message,
    PushNotificationConfig,
};

use super::auth::{auth_middleware, AuthState};
use super::subscription_hub::{HubEvent, HubEventKind};
use super::task_manager::TaskManager;

struct AppState {
    manager: Arc<TaskManager>,
    agent_card: AgentCard,
}

/// Build the axum `Router` for an A2A server.
///
/// `auth` layers [`auth_middleware`] over the two protocol routes when
/// present; the agent card route is always left unauthenticated since a
/// client needs it to discover what authentication the agent requires in
/// the first place.
pub fn a2a_router(manager: Arc<TaskManager>, agent_card: AgentCard, auth: Option<AuthState>) -> Router {
    let state = Arc::new(AppState { manager, agent_card });

    let mut protocol = Router::new()
        .route("/a2a", post(handle_jsonrpc))
        .route("/a2a/sse", post(handle_jsonrpc_sse));

    if let Some(auth_state) = auth {
        protocol = protocol.layer(middleware::from_fn_with_state(Arc::new(auth_state), auth_middleware));
    }

    Router::new()
        .route(
            "/.well-known/agent.json",
            get(handle_agent_card).layer(CorsLayer::permissive()),
        )
        .merge(protocol)
        .with_state(state)
}

async fn handle_agent_card(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.agent_card.clone())
}

fn success_response(id: Option<JsonRpcId>, value: impl Serialize) -> Response {
    match JsonRpcResponse::success(id.clone(), value) {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => error_response(id, A2AError::internal_error(e.to_string())),
    }
}

fn error_response(id: Option<JsonRpcId>, err: A2AError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let rpc_err: JsonRpcError = err.into();
    (status, Json(JsonRpcResponse::error(id, rpc_err))).into_response()
}

fn require_object(params: &Option<Value>) -> Result<&serde_json::Map<String, Value>, A2AError> {
    params
        .as_ref()
        .and_then(|v| v.as_object())
        .ok_or_else(|| A2AError::invalid_params("params must be an object"))
}

fn parse_send_params(params: &Option<Value>) -> Result<(Option<String>, Option<String>, Message), A2AError> {
    let obj = require_object(params)?;
    let message = obj
        .get("message")
        .cloned()
        .ok_or_else(|| A2AError::invalid_params("missing 'message' field"))?;
    let message: Message = serde_json::from_value(message)
        .map_err(|e| A2AError::invalid_params(format!("invalid message: {e}")))?;
    let task_id = obj.get("taskId").and_then(|v| v.as_str()).map(String::from);
    let session_id = obj
        .get("sessionId")
        .and_then(|v| v.as_str())
        .map(String::from);
    Ok((task_id, session_id, message))
}

fn parse_task_id(params: &Option<Value>) -> Result<String, A2AError> {
    let obj = require_object(params)?;
    obj.get("taskId")
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| A2AError::invalid_params("missing 'taskId' field"))
}

fn parse_push_config(params: &Option<Value>) -> Result<PushNotificationConfig, A2AError> {
    let value = params
        .clone()
        .ok_or_else(|| A2AError::invalid_params("params must be an object"))?;
    serde_json::from_value(value).map_err(|e| A2AError::invalid_params(format!("invalid push notification config: {e}")))
}

// ---------------------------------------------------------------------------
// POST /a2a — request/response methods
// ---------------------------------------------------------------------------

async fn handle_jsonrpc(State(state): State<Arc<AppState>>, Json(request): Json<JsonRpcRequest>) -> Response {
    if request.jsonrpc != "2.0" {
        return error_response(request.id, A2AError::invalid_request("jsonrpc must be \"2.0\""));
    }
    debug!(method = %request.method, "jsonrpc request received");

    match request.method.as_str() {
        "tasks/send" => handle_send_task(state, request).await,
        "tasks/get" => handle_get_task(state, request).await,
        "tasks/cancel" => handle_cancel_task(state, request).await,
        "tasks/pushNotification/set" => handle_set_push_config(state, request).await,
        "tasks/pushNotification/get" => handle_get_push_config(state, request).await,
        other => {
            warn!(method = %other, "unknown jsonrpc method");
            error_response(request.id, A2AError::method_not_found(other))
        }
    }
}

async fn handle_send_task(state: Arc<AppState>, request: JsonRpcRequest) -> Response {
    let (task_id, session_id, message) = match parse_send_params(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.send(task_id, session_id, message).await {
        Ok(task) => success_response(request.id, task),
        Err(err) => error_response(request.id, err),
    }
}

async fn handle_get_task(state: Arc<AppState>, request: JsonRpcRequest) -> Response {
    let task_id = match parse_task_id(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.get(&task_id).await {
        Ok(task) => success_response(request.id, task),
        Err(err) => error_response(request.id, err),
    }
}

async fn handle_cancel_task(state: Arc<AppState>, request: JsonRpcRequest) -> Response {
    let task_id = match parse_task_id(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.cancel(&task_id).await {
        Ok(task) => success_response(request.id, task),
        Err(err) => error_response(request.id, err),
    }
}

async fn handle_set_push_config(state: Arc<AppState>, request: JsonRpcRequest) -> Response {
    let config = match parse_push_config(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.set_push_config(config).await {
        Ok(()) => success_response(request.id, Value::Null),
        Err(err) => error_response(request.id, err),
    }
}

async fn handle_get_push_config(state: Arc<AppState>, request: JsonRpcRequest) -> Response {
    let task_id = match parse_task_id(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.get_push_config(&task_id).await {
        Ok(config) => success_response(request.id, config),
        Err(err) => error_response(request.id, err),
    }
}

// ---------------------------------------------------------------------------
// POST /a2a/sse — streaming methods
// ---------------------------------------------------------------------------

async fn handle_jsonrpc_sse(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    if request.jsonrpc != "2.0" {
        return error_response(request.id, A2AError::invalid_request("jsonrpc must be \"2.0\""));
    }
    let last_event_id = headers
        .get("last-event-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    debug!(method = %request.method, "jsonrpc sse request received");

    match request.method.as_str() {
        "tasks/sendSubscribe" => handle_send_subscribe(state, request).await,
        "tasks/resubscribe" => handle_resubscribe(state, request, last_event_id).await,
        other => {
            warn!(method = %other, "unknown jsonrpc sse method");
            error_response(request.id, A2AError::method_not_found(other))
        }
    }
}

async fn handle_send_subscribe(state: Arc<AppState>, request: JsonRpcRequest) -> Response {
    let (task_id, session_id, message) = match parse_send_params(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.send_subscribe(task_id, session_id, message).await {
        Ok((_task, rx)) => {
            let stream = make_sse_stream(request.id, None, rx, false);
            Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
        }
        Err(err) => error_response(request.id, err),
    }
}

async fn handle_resubscribe(state: Arc<AppState>, request: JsonRpcRequest, last_event_id: Option<String>) -> Response {
    let task_id = match parse_task_id(&request.params) {
        Ok(v) => v,
        Err(err) => return error_response(request.id, err),
    };
    match state.manager.resubscribe(&task_id, last_event_id.as_deref()).await {
        Ok((replay, rx, terminal)) => {
            let stream = make_sse_stream(request.id, replay, rx, terminal);
            Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
        }
        Err(err) => error_response(request.id, err),
    }
}

fn to_sse_event(request_id: &Option<JsonRpcId>, event: &HubEvent) -> Option<Event> {
    let (kind, payload) = match event.kind {
        HubEventKind::Status => (
            "taskStatusUpdate",
            serde_json::json!({ "taskId": event.task_id, "status": event.status }),
        ),
        HubEventKind::Artifact => (
            "taskArtifactUpdate",
            serde_json::json!({ "taskId": event.task_id, "artifact": event.artifact }),
        ),
    };
    let response = JsonRpcResponse::success(request_id.clone(), payload).ok()?;
    let body = serde_json::to_string(&response).ok()?;
    Some(Event::default().id(event.id.clone()).event(kind).data(body))
}

/// Frame a subscription hub's events as an SSE stream: an opening comment so
/// proxies flush the connection immediately, an optional replay event, then
/// everything published afterward. Ends (with a final `done` event) once a
/// terminal status crosses the wire or the broadcast channel closes.
fn make_sse_stream(
    request_id: Option<JsonRpcId>,
    replay: Option<HubEvent>,
    mut rx: broadcast::Receiver<HubEvent>,
    already_terminal: bool,
) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        yield Ok(Event::default().comment("connected"));

        if let Some(event) = &replay {
            if let Some(sse_event) = to_sse_event(&request_id, event) {
                yield Ok(sse_event);
            }
        }
        if already_terminal {
            yield Ok(Event::default().event("done").data(""));
            return;
        }

        loop {
            match rx.recv().await {
                Ok(event) => {
                    let is_terminal = matches!(&event.status, Some(status) if status.state.is_terminal());
                    if let Some(sse_event) = to_sse_event(&request_id, &event) {
                        yield Ok(sse_event);
                    }
                    if is_terminal {
                        yield Ok(Event::default().event("done").data(""));
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "SSE stream lagged — subscriber evicted");
                    yield Ok(Event::default().event("done").data(""));
                    break;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    yield Ok(Event::default().event("done").data(""));
                    break;
                }
            }
        }
    }
}
