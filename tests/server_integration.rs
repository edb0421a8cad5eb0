//! In-process HTTP integration tests for `a2a_router`, driven through
//! `tower::ServiceExt::oneshot` against the real axum `Router` rather than a
//! bound TCP socket.

mod common;

use std::sync::Arc;

use a2a_runtime::server::{a2a_router, InMemoryTaskStore, TaskManager};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{test_agent_card, EchoAgent, ResumableAgent};
use serde_json::Value;
use tower::ServiceExt;

fn router() -> axum::Router {
    let manager = Arc::new(TaskManager::new(Arc::new(EchoAgent), Arc::new(InMemoryTaskStore::new())));
    a2a_router(manager, test_agent_card("http://localhost"), None)
}

fn resumable_router() -> axum::Router {
    let manager = Arc::new(TaskManager::new(Arc::new(ResumableAgent), Arc::new(InMemoryTaskStore::new())));
    a2a_router(manager, test_agent_card("http://localhost"), None)
}

async fn post_json(router: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn agent_card_is_served_unauthenticated() {
    let request = Request::builder().method("GET").uri("/.well-known/agent.json").body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let card: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(card["id"], "test-echo-agent");
}

#[tokio::test]
async fn send_task_returns_completed_task() {
    let body = common::send_task_request(1, "hello");
    let (status, response) = post_json(router(), "/a2a", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["result"]["status"]["state"], "completed");
}

#[tokio::test]
async fn get_task_after_send_round_trips_the_task_id() {
    let r = router();
    let (_status, sent) = post_json(r.clone(), "/a2a", common::send_task_request(1, "hi")).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();

    let get_body = serde_json::json!({"jsonrpc": "2.0", "id": 2, "method": "tasks/get", "params": {"taskId": task_id}});
    let (status, response) = post_json(r, "/a2a", get_body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["result"]["id"], task_id);
}

#[tokio::test]
async fn get_task_for_unknown_id_returns_404_and_json_rpc_error() {
    let body = serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "tasks/get", "params": {"taskId": "missing"}});
    let (status, response) = post_json(router(), "/a2a", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"]["code"], -32001);
}

#[tokio::test]
async fn unknown_method_returns_method_not_found() {
    let body = serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "doesNotExist", "params": {}});
    let (status, response) = post_json(router(), "/a2a", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn malformed_params_returns_invalid_params_error() {
    let body = serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "tasks/send", "params": {}});
    let (status, response) = post_json(router(), "/a2a", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn set_and_get_push_notification_config_round_trip() {
    let r = router();
    let (_status, sent) = post_json(r.clone(), "/a2a", common::send_task_request(1, "hi")).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();

    let set_body = serde_json::json!({
        "jsonrpc": "2.0", "id": 2, "method": "tasks/pushNotification/set",
        "params": {"taskId": task_id, "url": "https://example.com/hook", "includeTaskData": true, "includeArtifacts": false},
    });
    let (status, response) = post_json(r.clone(), "/a2a", set_body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["result"], Value::Null);

    let get_body = serde_json::json!({"jsonrpc": "2.0", "id": 3, "method": "tasks/pushNotification/get", "params": {"taskId": task_id}});
    let (_status, response) = post_json(r, "/a2a", get_body).await;
    assert_eq!(response["result"]["url"], "https://example.com/hook");
}

#[tokio::test]
async fn resuming_a_terminal_task_returns_task_not_resumable() {
    let r = router();
    let (_status, sent) = post_json(r.clone(), "/a2a", common::send_task_request(1, "hi")).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();
    assert_eq!(sent["result"]["status"]["state"], "completed");

    let resume_body = serde_json::json!({
        "jsonrpc": "2.0", "id": 2, "method": "tasks/send",
        "params": {
            "taskId": task_id,
            "message": {"role": "user", "parts": [{"type": "text", "text": "again"}], "timestamp": "2024-01-01T00:00:00Z"},
        },
    });
    let (status, response) = post_json(r, "/a2a", resume_body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error"]["code"], -32002);
}

#[tokio::test]
async fn resuming_a_task_appends_message_and_reinvokes_the_handler() {
    let r = resumable_router();
    let (_status, sent) = post_json(r.clone(), "/a2a", common::send_task_request(1, "hi")).await;
    let task_id = sent["result"]["id"].as_str().unwrap().to_string();
    assert_eq!(sent["result"]["status"]["state"], "input-required");

    let resume_body = serde_json::json!({
        "jsonrpc": "2.0", "id": 2, "method": "tasks/send",
        "params": {
            "taskId": task_id,
            "message": {"role": "user", "parts": [{"type": "text", "text": "more"}], "timestamp": "2024-01-01T00:00:00Z"},
        },
    });
    let (status, response) = post_json(r, "/a2a", resume_body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["result"]["status"]["state"], "completed");
    assert_eq!(response["result"]["id"], task_id);
}

#[tokio::test]
async fn resuming_an_unknown_task_id_returns_task_not_found() {
    let resume_body = serde_json::json!({
        "jsonrpc": "2.0", "id": 1, "method": "tasks/send",
        "params": {
            "taskId": "missing",
            "message": {"role": "user", "parts": [{"type": "text", "text": "hi"}], "timestamp": "2024-01-01T00:00:00Z"},
        },
    });
    let (status, response) = post_json(router(), "/a2a", resume_body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"]["code"], -32001);
}
