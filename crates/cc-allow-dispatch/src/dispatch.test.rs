use super::*;
use pretty_assertions::assert_eq;
use cc_allow_config::MergedConfig;
use cc_allow_config::Tracked;
use cc_allow_pattern::PathVars;
use std::path::PathBuf;

fn default_merged() -> MergedConfig {
    let mut merged = MergedConfig::default();
    cc_allow_config::apply_defaults(&mut merged);
    merged
}

fn ctx() -> MatchContext {
    MatchContext::new(PathVars::default(), "/home/user/project")
}

fn hook_input(tool_name: &str, tool_input: crate::hook::ToolInput) -> HookInput {
    HookInput {
        session_id: "sess-1".to_string(),
        tool_name: tool_name.to_string(),
        tool_input,
    }
}

#[test]
fn empty_tool_name_dispatches_as_bash() {
    let mut merged = default_merged();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");

    let input = hook_input(
        "",
        crate::hook::ToolInput {
            command: Some("ls -la".to_string()),
            ..Default::default()
        },
    );

    let verdict = dispatch(&input, &PathBuf::from("/home/user/project"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Allow);
}

#[test]
fn unknown_tool_name_is_denied() {
    let merged = default_merged();
    let input = hook_input("DoesNotExist", crate::hook::ToolInput::default());
    let verdict = dispatch(&input, &PathBuf::from("/tmp"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Deny);
}

#[test]
fn read_without_file_path_asks() {
    let merged = default_merged();
    let input = hook_input("Read", crate::hook::ToolInput::default());
    let verdict = dispatch(&input, &PathBuf::from("/tmp"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Ask);
}

#[test]
fn read_with_matching_deny_pattern_denies() {
    let mut merged = default_merged();
    merged.read.deny.push((
        cc_allow_pattern::Pattern::parse("path:/etc/**").unwrap(),
        "no secrets".to_string(),
        "test.toml".to_string(),
    ));

    let input = hook_input(
        "Read",
        crate::hook::ToolInput {
            file_path: Some("/etc/shadow".to_string()),
            ..Default::default()
        },
    );
    let verdict = dispatch(&input, &PathBuf::from("/tmp"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Deny);
}

#[test]
fn webfetch_without_url_asks() {
    let merged = default_merged();
    let input = hook_input("WebFetch", crate::hook::ToolInput::default());
    let verdict = dispatch(&input, &PathBuf::from("/tmp"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Ask);
}

#[test]
fn glob_respects_read_deny_by_default() {
    let mut merged = default_merged();
    merged.read.deny.push((
        cc_allow_pattern::Pattern::parse("path:/home/user/project/secrets/**").unwrap(),
        "no secrets".to_string(),
        "test.toml".to_string(),
    ));

    let input = hook_input(
        "Glob",
        crate::hook::ToolInput {
            pattern: Some("*.env".to_string()),
            path: Some("secrets".to_string()),
            ..Default::default()
        },
    );
    let verdict = dispatch(&input, &PathBuf::from("/home/user/project"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Deny);
}

#[test]
fn glob_skips_read_rules_when_respect_disabled() {
    let mut merged = default_merged();
    merged.respect_file_rules = Tracked::set(false, "test.toml");
    merged.read.deny.push((
        cc_allow_pattern::Pattern::parse("path:/home/user/project/secrets/**").unwrap(),
        "no secrets".to_string(),
        "test.toml".to_string(),
    ));

    let input = hook_input(
        "Grep",
        crate::hook::ToolInput {
            pattern: Some("password".to_string()),
            path: Some("secrets".to_string()),
            ..Default::default()
        },
    );
    let verdict = dispatch(&input, &PathBuf::from("/home/user/project"), &ctx(), &merged, None);
    assert_eq!(verdict.action, Action::Allow);
}
