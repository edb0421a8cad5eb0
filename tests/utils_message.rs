//! Tests for `a2a_runtime::utils::message`.

use a2a_runtime::types::{Part, Role};
use a2a_runtime::utils::message::{get_message_text, new_agent_parts_message, new_agent_text_message};

#[test]
fn new_agent_text_message_has_agent_role_and_single_text_part() {
    let message = new_agent_text_message("hello there");
    assert_eq!(message.role, Role::Agent);
    assert_eq!(message.parts, vec![Part::text("hello there")]);
}

#[test]
fn new_agent_parts_message_preserves_part_order() {
    let parts = vec![Part::text("a"), Part::text("b")];
    let message = new_agent_parts_message(parts.clone());
    assert_eq!(message.role, Role::Agent);
    assert_eq!(message.parts, parts);
}

#[test]
fn get_message_text_joins_with_delimiter() {
    let message = new_agent_parts_message(vec![Part::text("line one"), Part::text("line two")]);
    assert_eq!(get_message_text(&message, "\n"), "line one\nline two");
}

#[test]
fn get_message_text_skips_non_text_parts() {
    let message = new_agent_parts_message(vec![
        Part::text("visible"),
        Part::file_uri("a.bin", "application/octet-stream", "https://example.com/a.bin"),
    ]);
    assert_eq!(get_message_text(&message, ", "), "visible");
}
