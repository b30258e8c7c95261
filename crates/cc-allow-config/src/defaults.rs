//! Baseline defaults applied after merge (§4.2 "Defaults"), each tagged
//! with the literal source `"(default)"` so a `--check` dump can tell a
//! config-supplied value from a baked-in one.

use cc_allow_pattern::Action;

use crate::model::MergedConfig;
use crate::model::MergedFileToolConfig;

const DEFAULT_SOURCE: &str = "(default)";
const FILE_TOOL_MESSAGE_TEMPLATE: &str = "{{.Tool}} requires approval: {{.FilePath}}";

pub fn apply_defaults(merged: &mut MergedConfig) {
    merged
        .policy_default
        .apply_default(Action::Ask, DEFAULT_SOURCE);
    merged
        .dynamic_commands
        .apply_default(Action::Ask, DEFAULT_SOURCE);
    merged
        .unresolved_commands
        .apply_default(Action::Ask, DEFAULT_SOURCE);
    merged
        .default_message
        .apply_default("Command not allowed".to_string(), DEFAULT_SOURCE);
    merged
        .respect_file_rules
        .apply_default(true, DEFAULT_SOURCE);

    merged
        .constructs_subshells
        .apply_default(Action::Ask, DEFAULT_SOURCE);
    merged
        .constructs_function_definitions
        .apply_default(Action::Ask, DEFAULT_SOURCE);
    merged
        .constructs_background
        .apply_default(Action::Ask, DEFAULT_SOURCE);
    merged
        .constructs_heredocs
        .apply_default(Action::Allow, DEFAULT_SOURCE);

    merged
        .redirects_respect_file_rules
        .apply_default(false, DEFAULT_SOURCE);

    apply_file_tool_defaults(&mut merged.read);
    apply_file_tool_defaults(&mut merged.write);
    apply_file_tool_defaults(&mut merged.edit);
    apply_file_tool_defaults(&mut merged.webfetch);

    merged
        .safe_browsing_enabled
        .apply_default(false, DEFAULT_SOURCE);
    merged.debug_enabled.apply_default(false, DEFAULT_SOURCE);
}

/// The default message is left as an unexpanded template; `.Tool` and
/// `.FilePath` are filled in by the templater (§4.8) at evaluation time,
/// once it knows which tool and argument produced the verdict.
fn apply_file_tool_defaults(tool: &mut MergedFileToolConfig) {
    tool.default.apply_default(Action::Ask, DEFAULT_SOURCE);
    tool.default_message
        .apply_default(FILE_TOOL_MESSAGE_TEMPLATE.to_string(), DEFAULT_SOURCE);
}

#[cfg(test)]
#[path = "defaults.test.rs"]
mod tests;
