//! Utility functions for creating A2A Artifact objects.

use crate::types::{Artifact, Part};
use crate::utils::parts::get_text_parts;
use uuid::Uuid;

/// Creates a new Artifact carrying a single Part, with a generated id and
/// the current time as its timestamp.
///
/// # Example
///
/// ```
/// use a2a_runtime::types::Part;
/// use a2a_runtime::utils::new_artifact;
///
/// let artifact = new_artifact("task-1", Part::text("Sample text"), None);
/// assert_eq!(artifact.task_id, "task-1");
/// ```
pub fn new_artifact(task_id: impl Into<String>, part: Part, metadata: Option<serde_json::Value>) -> Artifact {
    Artifact {
        id: Uuid::new_v4().to_string(),
        task_id: task_id.into(),
        timestamp: crate::types::now_rfc3339(),
        part,
        metadata,
    }
}

/// Creates a new Artifact carrying only a text Part.
///
/// # Example
///
/// ```
/// use a2a_runtime::utils::new_text_artifact;
///
/// let artifact = new_text_artifact("task-1", "Hello, world!");
/// ```
pub fn new_text_artifact(task_id: impl Into<String>, text: impl Into<String>) -> Artifact {
    new_artifact(task_id, Part::text(text), None)
}

/// Creates a new Artifact carrying only a structured data Part.
///
/// # Example
///
/// ```
/// use a2a_runtime::utils::new_data_artifact;
/// use serde_json::json;
///
/// let artifact = new_data_artifact("task-1", "application/json", json!({"key": "value"}));
/// ```
pub fn new_data_artifact(task_id: impl Into<String>, mime_type: impl Into<String>, data: serde_json::Value) -> Artifact {
    new_artifact(task_id, Part::data(mime_type, data), None)
}

/// Extracts text content from an Artifact's Part, if it is a text Part.
///
/// # Example
///
/// ```
/// use a2a_runtime::utils::{new_text_artifact, get_artifact_text};
///
/// let artifact = new_text_artifact("task-1", "First line");
/// assert_eq!(get_artifact_text(&artifact), Some("First line".to_string()));
/// ```
pub fn get_artifact_text(artifact: &Artifact) -> Option<String> {
    get_text_parts(std::slice::from_ref(&artifact.part)).into_iter().next()
}
