use super::*;
use pretty_assertions::assert_eq;

#[test]
fn empty_merge_gets_every_default() {
    let mut merged = MergedConfig::default();
    apply_defaults(&mut merged);

    assert_eq!(merged.policy_default.get(), Some(&Action::Ask));
    assert_eq!(merged.policy_default.source(), "(default)");
    assert_eq!(merged.dynamic_commands.get(), Some(&Action::Ask));
    assert_eq!(merged.unresolved_commands.get(), Some(&Action::Ask));
    assert_eq!(
        merged.default_message.get().map(String::as_str),
        Some("Command not allowed")
    );
    assert_eq!(merged.respect_file_rules.get(), Some(&true));

    assert_eq!(merged.constructs_subshells.get(), Some(&Action::Ask));
    assert_eq!(
        merged.constructs_function_definitions.get(),
        Some(&Action::Ask)
    );
    assert_eq!(merged.constructs_background.get(), Some(&Action::Ask));
    assert_eq!(merged.constructs_heredocs.get(), Some(&Action::Allow));

    assert_eq!(merged.redirects_respect_file_rules.get(), Some(&false));

    for tool in [&merged.read, &merged.write, &merged.edit, &merged.webfetch] {
        assert_eq!(tool.default.get(), Some(&Action::Ask));
        assert_eq!(
            tool.default_message.get().map(String::as_str),
            Some("{{.Tool}} requires approval: {{.FilePath}}")
        );
    }

    assert_eq!(merged.safe_browsing_enabled.get(), Some(&false));
    assert_eq!(merged.debug_enabled.get(), Some(&false));
}

#[test]
fn explicit_values_are_not_overridden_by_defaults() {
    let mut merged = MergedConfig::default();
    merged.policy_default.overwrite(Action::Deny, "a.toml");
    apply_defaults(&mut merged);
    assert_eq!(merged.policy_default.get(), Some(&Action::Deny));
    assert_eq!(merged.policy_default.source(), "a.toml");
}
