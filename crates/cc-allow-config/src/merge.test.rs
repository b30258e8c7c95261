use super::*;
use pretty_assertions::assert_eq;

fn cfg(path: &str, text: &str) -> Config {
    crate::load_str(path, text).expect("should compile")
}

#[test]
fn stricter_scalar_wins_regardless_of_order() {
    let loose = cfg("a.toml", "[bash]\ndefault = \"allow\"\n");
    let strict = cfg("b.toml", "[bash]\ndefault = \"deny\"\n");
    let merged = merge(&[loose, strict]);
    assert_eq!(merged.policy_default.get(), Some(&Action::Deny));
    assert_eq!(merged.policy_default.source(), "b.toml");
}

#[test]
fn stricter_scalar_wins_even_if_strict_config_came_first() {
    let strict = cfg("a.toml", "[bash]\ndefault = \"deny\"\n");
    let loose = cfg("b.toml", "[bash]\ndefault = \"allow\"\n");
    let merged = merge(&[strict, loose]);
    assert_eq!(merged.policy_default.get(), Some(&Action::Deny));
    assert_eq!(merged.policy_default.source(), "a.toml");
}

#[test]
fn deny_lists_accumulate_with_source_tags() {
    let a = cfg("a.toml", "[bash.deny]\ncommands = [\"rm\"]\n");
    let b = cfg("b.toml", "[bash.deny]\ncommands = [\"curl\"]\n");
    let merged = merge(&[a, b]);
    assert_eq!(merged.commands_deny.len(), 2);
    assert_eq!(merged.commands_deny[0].1, "a.toml");
    assert_eq!(merged.commands_deny[1].1, "b.toml");
}

#[test]
fn allow_replace_clears_previous_allow_entries_but_not_deny() {
    let a = cfg(
        "a.toml",
        "[bash.allow]\ncommands = [\"git\"]\n[bash.deny]\ncommands = [\"rm\"]\n",
    );
    let b = cfg(
        "b.toml",
        "[bash.allow]\ncommands = [\"npm\"]\nmode = \"replace\"\n",
    );
    let merged = merge(&[a, b]);
    assert_eq!(merged.commands_allow.len(), 1);
    assert_eq!(merged.commands_allow[0].1, "b.toml");
    assert_eq!(merged.commands_deny.len(), 1);
}

#[test]
fn allow_replace_clears_previously_accumulated_allow_action_rules() {
    let a = cfg(
        "a.toml",
        r#"
        [[bash.rules]]
        command = "git"
        action = "allow"
        "#,
    );
    let b = cfg(
        "b.toml",
        r#"
        [bash.allow]
        commands = ["npm"]
        mode = "replace"

        [[bash.rules]]
        command = "curl"
        action = "deny"
        "#,
    );
    let merged = merge(&[a, b]);
    assert_eq!(merged.rules.len(), 1);
    assert_eq!(merged.rules[0].source, "b.toml");
}

#[test]
fn stricter_new_rule_shadows_the_earlier_looser_one() {
    let a = cfg(
        "a.toml",
        r#"
        [[bash.rules]]
        command = "git"
        action = "allow"
        "#,
    );
    let b = cfg(
        "b.toml",
        r#"
        [[bash.rules]]
        command = "git"
        action = "deny"
        "#,
    );
    let merged = merge(&[a, b]);
    assert_eq!(merged.rules.len(), 2);
    assert!(merged.rules[0].shadowed);
    assert_eq!(merged.rules[0].shadowing.as_deref(), Some("b.toml"));
    assert!(!merged.rules[1].shadowed);
}

#[test]
fn looser_new_rule_is_itself_shadowed_by_the_earlier_stricter_one() {
    let a = cfg(
        "a.toml",
        r#"
        [[bash.rules]]
        command = "git"
        action = "deny"
        "#,
    );
    let b = cfg(
        "b.toml",
        r#"
        [[bash.rules]]
        command = "git"
        action = "allow"
        "#,
    );
    let merged = merge(&[a, b]);
    assert_eq!(merged.rules.len(), 2);
    assert!(!merged.rules[0].shadowed);
    assert!(merged.rules[1].shadowed);
    assert_eq!(merged.rules[1].shadowing.as_deref(), Some("a.toml"));
}

#[test]
fn distinct_rules_are_not_shadowed() {
    let a = cfg(
        "a.toml",
        r#"
        [[bash.rules]]
        command = "git"
        action = "allow"
        "#,
    );
    let b = cfg(
        "b.toml",
        r#"
        [[bash.rules]]
        command = "npm"
        action = "deny"
        "#,
    );
    let merged = merge(&[a, b]);
    assert!(!merged.rules[0].shadowed);
    assert!(merged.rules[1].shadowing.is_none());
}

#[test]
fn bool_switch_stays_on_once_any_config_turns_it_on() {
    let off = cfg("a.toml", "[bash]\nrespect_file_rules = false\n");
    let on = cfg("b.toml", "[bash]\nrespect_file_rules = true\n");
    let merged = merge(&[off, on]);
    assert_eq!(merged.respect_file_rules.get(), Some(&true));
}

#[test]
fn file_tool_deny_and_allow_merge_independently() {
    let a = cfg(
        "a.toml",
        "[read.deny]\npaths = [\"path:/etc/**\"]\n[read.allow]\npaths = [\"path:/tmp/**\"]\n",
    );
    let merged = merge(&[a]);
    assert_eq!(merged.read.deny.len(), 1);
    assert_eq!(merged.read.allow.len(), 1);
}
