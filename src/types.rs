//! A2A protocol wire types.
//!
//! These are the types that cross the wire between the protocol dispatcher,
//! the task manager, and the client library: the task state machine, the
//! message/part/artifact data model, push notification configuration, the
//! agent card, and the JSON-RPC envelope itself.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Task state machine
// ============================================================================

/// The lifecycle state of a task.
///
/// `submitted` and `working` and `input-required` are non-terminal;
/// `completed`, `failed`, and `cancelled` are terminal and absorbing — once
/// reached, no further transitions occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Created; handler not yet started.
    Submitted,
    /// Handler running.
    Working,
    /// Paused, awaiting client follow-up via resume.
    InputRequired,
    /// Terminal — success.
    Completed,
    /// Terminal — error.
    Failed,
    /// Terminal — client-initiated cancellation.
    Cancelled,
}

impl TaskState {
    /// Returns `true` for the three absorbing states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Cancelled
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Submitted => "submitted",
            TaskState::Working => "working",
            TaskState::InputRequired => "input-required",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Agent => "agent",
            Role::System => "system",
        };
        write!(f, "{s}")
    }
}

// ============================================================================
// Message content
// ============================================================================

/// One piece of message or artifact content.
///
/// A closed sum with a single discriminator field, `type`, on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Part {
    /// Plain text content.
    Text { text: String },
    /// A file, referenced by URL or carried inline as base64.
    ///
    /// Exactly one of `uri`/`bytes` is expected to be set; this is a
    /// producer-side convention, not something serde enforces.
    File {
        filename: String,
        mime_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        uri: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bytes: Option<String>,
    },
    /// Structured data of a declared MIME type (e.g. `application/json`).
    Data {
        mime_type: String,
        data: serde_json::Value,
    },
}

impl Part {
    /// Convenience constructor for a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Convenience constructor for a file part referenced by URI.
    pub fn file_uri(filename: impl Into<String>, mime_type: impl Into<String>, uri: impl Into<String>) -> Self {
        Part::File {
            filename: filename.into(),
            mime_type: mime_type.into(),
            uri: Some(uri.into()),
            bytes: None,
        }
    }

    /// Convenience constructor for a file part with inline base64 content.
    pub fn file_bytes(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<String>,
    ) -> Self {
        Part::File {
            filename: filename.into(),
            mime_type: mime_type.into(),
            uri: None,
            bytes: Some(bytes.into()),
        }
    }

    /// Convenience constructor for a structured data part.
    pub fn data(mime_type: impl Into<String>, data: serde_json::Value) -> Self {
        Part::Data {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// A single entry in a task's history.
///
/// The first history entry of a task is always the initiating user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    /// Build a message with the given role, a single text part, and the
    /// current time as its timestamp.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
            timestamp: now_rfc3339(),
            metadata: None,
        }
    }
}

/// An immutable output produced by a task. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Server-generated, unique within the owning task.
    pub id: String,
    pub task_id: String,
    pub timestamp: String,
    pub part: Part,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

// ============================================================================
// Task
// ============================================================================

/// `{ state, timestamp, optional message }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub state: TaskState,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl TaskStatus {
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            timestamp: now_rfc3339(),
            message: None,
        }
    }

    pub fn with_message(state: TaskState, message: Message) -> Self {
        Self {
            state,
            timestamp: now_rfc3339(),
            message: Some(message),
        }
    }
}

/// The central entity: a unit of work with identity, state machine, history,
/// and artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-generated, globally unique within the process.
    pub id: String,
    /// Caller-supplied correlation id. Threaded through but never
    /// interpreted server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub status: TaskStatus,
    /// Append-only, chronological.
    pub history: Vec<Message>,
    /// Append-only.
    pub artifacts: Vec<Artifact>,
}

impl Task {
    /// Construct a freshly `submitted` task from its initiating message.
    pub fn new(id: impl Into<String>, session_id: Option<String>, initial_message: Message) -> Self {
        Self {
            id: id.into(),
            session_id,
            status: TaskStatus::new(TaskState::Submitted),
            history: vec![initial_message],
            artifacts: Vec::new(),
        }
    }
}

// ============================================================================
// Push notifications
// ============================================================================

/// Authentication to inject when delivering a push notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PushNotificationAuth {
    Bearer { token: String },
    Header { name: String, value: String },
}

fn default_true() -> bool {
    true
}

/// Per-task, mutable. At most one config per task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationConfig {
    pub task_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<PushNotificationAuth>,
    #[serde(default = "default_true")]
    pub include_task_data: bool,
    #[serde(default)]
    pub include_artifacts: bool,
}

// ============================================================================
// Agent card
// ============================================================================

/// A named capability the agent exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Capability flags advertised on the agent card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub sessions: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

/// An authentication scheme the agent card declares it accepts.
///
/// Order in the card's `authentication_schemes` list is significant: the
/// auth middleware attempts extraction in this order (§4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthScheme {
    Bearer,
    Header { name: String },
    OAuth2 { config: serde_json::Value },
}

/// Contact/provider metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProvider {
    pub organization: String,
    pub url: String,
}

/// Static metadata served under a well-known path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub protocol_version: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub url: String,
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    #[serde(default)]
    pub authentication_schemes: Vec<AuthScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,
}

// ============================================================================
// JSON-RPC envelope
// ============================================================================

/// The JSON-RPC `id` can be any JSON value; preserved as an opaque blob
/// through parse → dispatch → response rather than typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Number(i64),
    Null,
}

impl From<String> for JsonRpcId {
    fn from(s: String) -> Self {
        JsonRpcId::String(s)
    }
}

impl From<i64> for JsonRpcId {
    fn from(n: i64) -> Self {
        JsonRpcId::Number(n)
    }
}

/// `{ jsonrpc: "2.0", method, params (raw JSON), id }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonRpcId>,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: impl Serialize, id: JsonRpcId) -> serde_json::Result<Self> {
        Ok(Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params: Some(serde_json::to_value(params)?),
            id: Some(id),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<JsonRpcId>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<JsonRpcId>, result: impl Serialize) -> serde_json::Result<Self> {
        Ok(Self {
            jsonrpc: "2.0".to_string(),
            result: Some(serde_json::to_value(result)?),
            error: None,
            id,
        })
    }

    pub fn error(id: Option<JsonRpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// Current wall-clock time, RFC3339-formatted. Every server-stamped
/// timestamp in this crate goes through this function so they're directly
/// comparable as strings.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
