//! The hook protocol's stdin/stdout JSON shapes (§6).

use serde::Deserialize;
use serde::Serialize;

/// One `PreToolUse` hook invocation, read from stdin as a single JSON
/// value. `tool_name` is validated against [`cc_allow_pattern::Tool`] by
/// the dispatcher, not here — an unknown value is a dispatch-time error,
/// not a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    pub session_id: String,
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: ToolInput,
}

/// The union of fields any tool's `tool_input` may carry. Every field is
/// optional because the set actually present depends on `tool_name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    pub command: Option<String>,
    pub file_path: Option<String>,
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub pattern: Option<String>,
    pub path: Option<String>,
}

/// What the dispatcher writes to stdout on an allow verdict (§6): empty
/// unless a rule left cross-session suggestions for the host to surface.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HookOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

#[cfg(test)]
#[path = "hook.test.rs"]
mod tests;
