//! A2A error types — JSON-RPC error codes + A2A-specific errors.
//!
//! Standard JSON-RPC 2.0 errors (-32700 through -32603) plus the
//! application-defined error codes this crate layers on top (-32001 through
//! -32006). Every error also carries an HTTP status code for the protocol
//! dispatcher, since JSON-RPC codes alone don't tell the dispatcher what
//! status line to send.

use crate::types::JsonRpcError;

// ---------------------------------------------------------------------------
// Standard JSON-RPC 2.0 error codes
// ---------------------------------------------------------------------------

/// Invalid JSON was received by the server.
pub const PARSE_ERROR: i64 = -32700;

/// The JSON sent is not a valid Request object.
pub const INVALID_REQUEST: i64 = -32600;

/// The method does not exist / is not available.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Invalid method parameter(s).
pub const INVALID_PARAMS: i64 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;

// ---------------------------------------------------------------------------
// Application-defined error codes
// ---------------------------------------------------------------------------

/// The requested task was not found.
pub const TASK_NOT_FOUND: i64 = -32001;

/// The task is terminal and cannot be resumed or cancelled again.
pub const TASK_NOT_RESUMABLE: i64 = -32002;

/// The requested operation is not supported by this agent.
pub const OPERATION_NOT_SUPPORTED: i64 = -32003;

/// The request requires authentication that was not provided.
pub const AUTHENTICATION_REQUIRED: i64 = -32004;

/// The provided credentials were rejected.
pub const AUTHENTICATION_FAILED: i64 = -32005;

/// The caller has exceeded a rate limit.
pub const RATE_LIMIT_EXCEEDED: i64 = -32006;

// ---------------------------------------------------------------------------
// A2AError enum
// ---------------------------------------------------------------------------

/// Unified error type for all A2A and JSON-RPC errors.
///
/// Each protocol-error variant carries an optional human-readable message and
/// optional structured data payload. Also includes transport/client-side
/// error variants that never cross the wire as JSON-RPC errors but are
/// needed for a complete client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum A2AError {
    /// Invalid JSON payload (code -32700).
    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Request payload validation error (code -32600).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Method not found (code -32601).
    #[error("Method not found: {message}")]
    MethodNotFound {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Invalid parameters (code -32602).
    #[error("Invalid params: {message}")]
    InvalidParams {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Internal error (code -32603).
    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Task not found (code -32001).
    #[error("Task not found: {message}")]
    TaskNotFound {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Task is terminal; cannot be resumed/cancelled again (code -32002).
    #[error("Task not resumable: {message}")]
    TaskNotResumable {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Operation not supported by this agent (code -32003).
    #[error("Operation not supported: {message}")]
    OperationNotSupported {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Request requires authentication that was not provided (code -32004).
    #[error("Authentication required: {message}")]
    AuthenticationRequired {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Provided credentials were rejected (code -32005).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Caller exceeded a rate limit (code -32006).
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        data: Option<serde_json::Value>,
    },

    // -- Client/transport-side errors (never sent as JSON-RPC errors) --
    /// Transport-level error (connection failed, request failed, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request or stream timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error with status code and response body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Invalid JSON received from remote (parse or deserialization failure).
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// A JSON-RPC error response was received from the remote agent.
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },
}

/// Convenience result type for A2A operations.
pub type A2AResult<T> = Result<T, A2AError>;

impl A2AError {
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError { message: message.into(), data: None }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest { message: message.into(), data: None }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::MethodNotFound { message: message.into(), data: None }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams { message: message.into(), data: None }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError { message: message.into(), data: None }
    }

    pub fn task_not_found(message: impl Into<String>) -> Self {
        Self::TaskNotFound { message: message.into(), data: None }
    }

    pub fn task_not_resumable(message: impl Into<String>) -> Self {
        Self::TaskNotResumable { message: message.into(), data: None }
    }

    pub fn operation_not_supported(message: impl Into<String>) -> Self {
        Self::OperationNotSupported { message: message.into(), data: None }
    }

    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired { message: message.into(), data: None }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed { message: message.into(), data: None }
    }

    pub fn rate_limit_exceeded(message: impl Into<String>) -> Self {
        Self::RateLimitExceeded { message: message.into(), data: None }
    }

    /// Returns the JSON-RPC error code for this error variant.
    ///
    /// For transport/client-side errors that never cross the wire as a
    /// JSON-RPC error, returns -32603 (internal error).
    pub fn code(&self) -> i64 {
        match self {
            A2AError::ParseError { .. } => PARSE_ERROR,
            A2AError::InvalidRequest { .. } => INVALID_REQUEST,
            A2AError::MethodNotFound { .. } => METHOD_NOT_FOUND,
            A2AError::InvalidParams { .. } => INVALID_PARAMS,
            A2AError::InternalError { .. } => INTERNAL_ERROR,
            A2AError::TaskNotFound { .. } => TASK_NOT_FOUND,
            A2AError::TaskNotResumable { .. } => TASK_NOT_RESUMABLE,
            A2AError::OperationNotSupported { .. } => OPERATION_NOT_SUPPORTED,
            A2AError::AuthenticationRequired { .. } => AUTHENTICATION_REQUIRED,
            A2AError::AuthenticationFailed { .. } => AUTHENTICATION_FAILED,
            A2AError::RateLimitExceeded { .. } => RATE_LIMIT_EXCEEDED,
            A2AError::Transport(_)
            | A2AError::Timeout(_)
            | A2AError::Http { .. }
            | A2AError::InvalidJson(_) => INTERNAL_ERROR,
            A2AError::JsonRpc { code, .. } => *code,
        }
    }

    /// Returns the HTTP status line the protocol dispatcher should send for
    /// this error. JSON-RPC error codes travel inside a 200 envelope in most
    /// JSON-RPC servers, but this dispatcher distinguishes transport-level
    /// failures (auth, rate limiting) with their conventional HTTP status.
    pub fn http_status(&self) -> u16 {
        match self {
            A2AError::AuthenticationRequired { .. } => 401,
            A2AError::AuthenticationFailed { .. } => 401,
            A2AError::TaskNotFound { .. } => 404,
            A2AError::ParseError { .. }
            | A2AError::InvalidRequest { .. }
            | A2AError::InvalidParams { .. }
            | A2AError::MethodNotFound { .. } => 400,
            A2AError::RateLimitExceeded { .. } => 429,
            A2AError::InternalError { .. }
            | A2AError::TaskNotResumable { .. }
            | A2AError::OperationNotSupported { .. } => 500,
            A2AError::Transport(_)
            | A2AError::Timeout(_)
            | A2AError::Http { .. }
            | A2AError::InvalidJson(_)
            | A2AError::JsonRpc { .. } => 500,
        }
    }

    /// Returns the default human-readable message for this error variant.
    pub fn default_message(&self) -> &str {
        match self {
            A2AError::ParseError { .. } => "Invalid JSON payload",
            A2AError::InvalidRequest { .. } => "Request payload validation error",
            A2AError::MethodNotFound { .. } => "Method not found",
            A2AError::InvalidParams { .. } => "Invalid parameters",
            A2AError::InternalError { .. } => "Internal error",
            A2AError::TaskNotFound { .. } => "Task not found",
            A2AError::TaskNotResumable { .. } => "Task is terminal and cannot be resumed",
            A2AError::OperationNotSupported { .. } => "This operation is not supported",
            A2AError::AuthenticationRequired { .. } => "Authentication required",
            A2AError::AuthenticationFailed { .. } => "Authentication failed",
            A2AError::RateLimitExceeded { .. } => "Rate limit exceeded",
            A2AError::Transport(_) => "Transport error",
            A2AError::Timeout(_) => "Request timed out",
            A2AError::Http { .. } => "HTTP error",
            A2AError::InvalidJson(_) => "Invalid JSON",
            A2AError::JsonRpc { .. } => "JSON-RPC error",
        }
    }
}

impl From<A2AError> for JsonRpcError {
    fn from(err: A2AError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let data = match &err {
            A2AError::ParseError { data, .. }
            | A2AError::InvalidRequest { data, .. }
            | A2AError::MethodNotFound { data, .. }
            | A2AError::InvalidParams { data, .. }
            | A2AError::InternalError { data, .. }
            | A2AError::TaskNotFound { data, .. }
            | A2AError::TaskNotResumable { data, .. }
            | A2AError::OperationNotSupported { data, .. }
            | A2AError::AuthenticationRequired { data, .. }
            | A2AError::AuthenticationFailed { data, .. }
            | A2AError::RateLimitExceeded { data, .. }
            | A2AError::JsonRpc { data, .. } => data.clone(),
            _ => None,
        };
        JsonRpcError { code, message, data }
    }
}

impl From<serde_json::Error> for A2AError {
    fn from(err: serde_json::Error) -> Self {
        A2AError::ParseError { message: err.to_string(), data: None }
    }
}
