use super::*;
use pretty_assertions::assert_eq;

#[test]
fn missing_tool_name_deserializes_to_empty_string() {
    let input: HookInput = serde_json::from_str(
        r#"{"session_id": "abc", "tool_input": {"command": "ls"}}"#,
    )
    .unwrap();
    assert_eq!(input.tool_name, "");
    assert_eq!(input.tool_input.command.as_deref(), Some("ls"));
}

#[test]
fn hook_output_with_no_context_serializes_to_empty_object() {
    let output = HookOutput::default();
    assert_eq!(serde_json::to_string(&output).unwrap(), "{}");
}

#[test]
fn hook_output_with_context_includes_it() {
    let output = HookOutput {
        additional_context: Some("note".to_string()),
    };
    assert_eq!(
        serde_json::to_string(&output).unwrap(),
        r#"{"additional_context":"note"}"#
    );
}
