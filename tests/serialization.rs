//! Wire-format tests: these pin the exact JSON shape the protocol dispatcher
//! and client depend on, since both sides serialize/deserialize these types
//! independently and must agree on field names and casing.

use a2a_runtime::types::{
    AgentCapabilities, AgentCard, Artifact, JsonRpcId, JsonRpcRequest, Message, Part,
    PushNotificationAuth, PushNotificationConfig, Role, Task, TaskState, TaskStatus,
};

#[test]
fn part_text_serializes_with_camelcase_type_tag() {
    let part = Part::text("hi");
    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(json, serde_json::json!({"type": "text", "text": "hi"}));
}

#[test]
fn part_file_omits_unset_uri_and_bytes() {
    let part = Part::file_uri("a.pdf", "application/pdf", "https://example.com/a.pdf");
    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "file", "filename": "a.pdf", "mimeType": "application/pdf", "uri": "https://example.com/a.pdf"})
    );
}

#[test]
fn task_state_uses_kebab_case_on_the_wire() {
    assert_eq!(serde_json::to_string(&TaskState::InputRequired).unwrap(), "\"input-required\"");
    assert_eq!(serde_json::from_str::<TaskState>("\"input-required\"").unwrap(), TaskState::InputRequired);
}

#[test]
fn message_round_trips_with_camelcase_fields() {
    let message = Message::text(Role::User, "hello");
    let json = serde_json::to_string(&message).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back, message);
    assert!(!json.contains("timestamp\":null"));
}

#[test]
fn artifact_has_a_single_part_not_a_list() {
    let artifact = Artifact {
        id: "a1".to_string(),
        task_id: "t1".to_string(),
        timestamp: "2024-01-01T00:00:00Z".to_string(),
        part: Part::text("result"),
        metadata: None,
    };
    let json = serde_json::to_value(&artifact).unwrap();
    assert!(json["part"].is_object());
    assert!(json.get("parts").is_none());
}

#[test]
fn task_round_trips_through_json() {
    let task = Task::new("t1", Some("s1".to_string()), Message::text(Role::User, "hi"));
    let json = serde_json::to_string(&task).unwrap();
    let back: Task = serde_json::from_str(&json).unwrap();
    assert_eq!(back, task);
}

#[test]
fn task_status_omits_message_when_absent() {
    let status = TaskStatus::new(TaskState::Working);
    let json = serde_json::to_value(&status).unwrap();
    assert!(json.get("message").is_none());
}

#[test]
fn push_notification_config_defaults_include_task_data_true_and_artifacts_false() {
    let json = serde_json::json!({"taskId": "t1", "url": "https://example.com/hook"});
    let config: PushNotificationConfig = serde_json::from_value(json).unwrap();
    assert!(config.include_task_data);
    assert!(!config.include_artifacts);
}

#[test]
fn push_notification_auth_tags_on_type() {
    let auth = PushNotificationAuth::Bearer { token: "secret".to_string() };
    let json = serde_json::to_value(&auth).unwrap();
    assert_eq!(json, serde_json::json!({"type": "bearer", "token": "secret"}));
}

#[test]
fn agent_card_round_trips_with_capabilities() {
    let card = AgentCard {
        protocol_version: "1.0".to_string(),
        id: "agent-1".to_string(),
        name: "Agent One".to_string(),
        description: "desc".to_string(),
        version: "0.1.0".to_string(),
        url: "https://example.com".to_string(),
        skills: vec![],
        capabilities: AgentCapabilities { streaming: true, sessions: false, push_notifications: true },
        authentication_schemes: vec![],
        provider: None,
    };
    let json = serde_json::to_string(&card).unwrap();
    let back: AgentCard = serde_json::from_str(&json).unwrap();
    assert_eq!(back, card);
}

#[test]
fn json_rpc_id_accepts_string_and_number_variants() {
    assert_eq!(serde_json::from_str::<JsonRpcId>("\"abc\"").unwrap(), JsonRpcId::String("abc".to_string()));
    assert_eq!(serde_json::from_str::<JsonRpcId>("7").unwrap(), JsonRpcId::Number(7));
}

#[test]
fn json_rpc_request_always_carries_version_2_0() {
    let request = JsonRpcRequest::new("tasks/get", serde_json::json!({"taskId": "t1"}), JsonRpcId::Number(1)).unwrap();
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["method"], "tasks/get");
}
