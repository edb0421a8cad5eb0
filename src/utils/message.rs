//! Utility functions for creating and handling A2A Message objects.

use crate::types::{Message, Part, Role};
use crate::utils::parts::get_text_parts;

/// Creates a new agent message containing a single text Part, stamped with
/// the current time.
///
/// # Example
///
/// ```
/// use a2a_runtime::types::Role;
/// use a2a_runtime::utils::new_agent_text_message;
///
/// let message = new_agent_text_message("Hello, I'm an agent");
/// assert_eq!(message.role, Role::Agent);
/// ```
pub fn new_agent_text_message(text: impl Into<String>) -> Message {
    Message::text(Role::Agent, text)
}

/// Creates a new agent message containing a list of Parts, stamped with the
/// current time.
///
/// # Example
///
/// ```
/// use a2a_runtime::types::Part;
/// use a2a_runtime::utils::new_agent_parts_message;
///
/// let parts = vec![Part::text("Hello")];
/// let message = new_agent_parts_message(parts);
/// assert_eq!(message.role, a2a_runtime::types::Role::Agent);
/// ```
pub fn new_agent_parts_message(parts: Vec<Part>) -> Message {
    Message {
        role: Role::Agent,
        parts,
        timestamp: crate::types::now_rfc3339(),
        metadata: None,
    }
}

/// Extracts and joins all text content from a Message's parts.
///
/// # Example
///
/// ```
/// use a2a_runtime::utils::{new_agent_text_message, get_message_text};
///
/// let message = new_agent_text_message("Hello, world!");
/// let text = get_message_text(&message, "\n");
/// assert_eq!(text, "Hello, world!");
/// ```
pub fn get_message_text(message: &Message, delimiter: &str) -> String {
    get_text_parts(&message.parts).join(delimiter)
}
