use super::*;
use pretty_assertions::assert_eq;
use cc_allow_pattern::Action;

fn compile_text(text: &str) -> Config {
    crate::load_str("test.toml", text).expect("should compile")
}

#[test]
fn minimal_file_compiles_to_all_defaults_unset() {
    let cfg = compile_text("");
    assert!(cfg.version.is_none());
    assert!(cfg.bash.default.is_none());
    assert!(cfg.bash.rules.is_empty());
    assert!(cfg.read.deny.is_empty());
}

#[test]
fn legacy_version_is_rejected() {
    let err = crate::load_str("test.toml", "version = 1\n").unwrap_err();
    match err {
        ConfigLoadError::Validation(e) => assert_eq!(e.path, "version"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn bash_deny_commands_parse_into_patterns() {
    let cfg = compile_text(
        r#"
        [bash.deny]
        commands = ["rm", "re:^curl.*"]
        message = "no"
        "#,
    );
    assert_eq!(cfg.bash.commands.deny.len(), 2);
    assert_eq!(cfg.bash.commands.deny_message.as_deref(), Some("no"));
}

#[test]
fn aliases_expand_inside_commands_list() {
    let cfg = compile_text(
        r#"
        [aliases]
        vcs = ["git", "hg"]

        [bash.deny]
        commands = ["alias:vcs"]
        "#,
    );
    assert_eq!(cfg.bash.commands.deny.len(), 2);
}

#[test]
fn bash_rule_with_args_and_pipe_compiles() {
    let cfg = compile_text(
        r#"
        [[bash.rules]]
        command = "curl"
        action = "ask"
        message = "network access"

        [bash.rules.args]
        any = ["-O", "--output"]
        all = ["-s"]
        not = ["--insecure"]

        [bash.rules.args.position]
        "0" = ["get", "post"]

        [bash.rules.pipe]
        to = ["bash", "*"]
        from = []
        "#,
    );
    assert_eq!(cfg.bash.rules.len(), 1);
    let rule = &cfg.bash.rules[0];
    assert_eq!(rule.action, Action::Ask);
    assert!(rule.args.any.is_some());
    assert!(rule.args.all.is_some());
    assert!(rule.args.not.is_some());
    assert_eq!(rule.args.position.len(), 1);
    assert_eq!(rule.pipe.to.len(), 2);
}

#[test]
fn heredoc_rule_content_compiles() {
    let cfg = compile_text(
        r#"
        [[bash.heredocs]]
        action = "deny"
        message = "no destructive sql"

        [bash.heredocs.content]
        any = ["re:DROP TABLE"]
        "#,
    );
    assert_eq!(cfg.bash.heredocs.len(), 1);
}

#[test]
fn redirect_rule_compiles() {
    let cfg = compile_text(
        r#"
        [[bash.redirects]]
        action = "deny"
        message = "no overwriting system files"
        paths = ["path:/etc/**"]
        append = false
        "#,
    );
    assert_eq!(cfg.bash.redirects.len(), 1);
    assert_eq!(cfg.bash.redirects[0].append, Some(false));
}

#[test]
fn file_tool_allow_deny_compiles() {
    let cfg = compile_text(
        r#"
        [read]
        default = "ask"

        [read.allow]
        paths = ["path:$PROJECT_ROOT/**"]

        [read.deny]
        paths = ["path:/etc/**"]
        message = "system file"
        "#,
    );
    assert_eq!(cfg.read.default, Some(Action::Ask));
    assert_eq!(cfg.read.allow.len(), 1);
    assert_eq!(cfg.read.deny.len(), 1);
    assert_eq!(cfg.read.deny[0].1.as_deref(), Some("system file"));
}

#[test]
fn webfetch_safe_browsing_flag_compiles() {
    let cfg = compile_text(
        r#"
        [webfetch.safe_browsing]
        enabled = true
        "#,
    );
    assert!(cfg.webfetch.safe_browsing_enabled);
}

#[test]
fn unknown_field_is_rejected() {
    let err = crate::load_str("test.toml", "not_a_real_field = 1\n").unwrap_err();
    assert!(matches!(err, ConfigLoadError::Toml { .. }));
}

#[test]
fn invalid_pattern_reports_field_path() {
    let err = crate::load_str(
        "test.toml",
        r#"
        [bash.deny]
        commands = ["re:("]
        "#,
    )
    .unwrap_err();
    match err {
        ConfigLoadError::Validation(e) => assert!(e.path.contains("bash.deny.commands")),
        other => panic!("expected Validation, got {other:?}"),
    }
}
