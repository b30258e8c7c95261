use super::*;
use pretty_assertions::assert_eq;
use cc_allow_config::ArgsMatch;
use cc_allow_config::MergedBashRule;
use cc_allow_config::PipeContext;
use cc_allow_config::Tracked;
use cc_allow_pattern::Pattern;
use std::path::PathBuf;

fn ctx() -> MatchContext {
    MatchContext::new(cc_allow_pattern::PathVars::default(), "/home/user/project")
}

fn record(script: &str) -> ExtractionRecord {
    cc_allow_shell::extract(script, &PathBuf::from("/home/user/project")).unwrap()
}

fn rule(command: &str, action: Action) -> MergedBashRule {
    MergedBashRule {
        rule: cc_allow_config::BashRule {
            command: Pattern::parse(command).unwrap(),
            subcommands: Vec::new(),
            action,
            message: String::new(),
            args: ArgsMatch::default(),
            pipe: PipeContext::default(),
            respect_file_rules: None,
            file_access_type: None,
        },
        source: "test.toml".to_string(),
        shadowed: false,
        shadowing: None,
    }
}

#[test]
fn matching_rule_wins_over_default() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");
    merged.rules.push(rule("rm", Action::Deny));

    let verdict = evaluate_script(&record("rm -rf /tmp/x"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Deny);
}

#[test]
fn unmatched_command_falls_back_to_commands_list_then_default() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Ask, "(default)");
    merged.commands_allow.push((Pattern::parse("ls").unwrap(), "test.toml".to_string()));

    let verdict = evaluate_script(&record("ls -la"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Allow);
}

#[test]
fn dynamic_command_name_routes_through_dynamic_commands_policy() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");
    merged.dynamic_commands = Tracked::set(Action::Deny, "test.toml");

    let verdict = evaluate_script(&record("$(echo ls) -la"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Deny);
}

#[test]
fn background_job_contributes_construct_policy() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");
    merged.constructs_background = Tracked::set(Action::Ask, "test.toml");

    let verdict = evaluate_script(&record("sleep 10 &"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Ask);
}

#[test]
fn subshell_contributes_construct_policy() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");
    merged.constructs_subshells = Tracked::set(Action::Deny, "test.toml");

    let verdict = evaluate_script(&record("(cd /tmp && ls)"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Deny);
}

#[test]
fn config_error_short_circuits_to_ask() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");
    merged.config_errors.push("bad.toml: bash.rules[0]: boom".to_string());

    let verdict = evaluate_script(&record("ls"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Ask);
}

#[test]
fn commands_list_path_pattern_tracks_cd_and_resolves_relative_names() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Ask, "(default)");
    merged
        .commands_allow
        .push((Pattern::parse("path:/tmp/**").unwrap(), "test.toml".to_string()));

    let allowed = evaluate_script(&record("cd /tmp && ./tool"), &ctx(), &merged);
    assert_eq!(allowed.action, Action::Allow);

    let asked = evaluate_script(&record("./tool"), &ctx(), &merged);
    assert_eq!(asked.action, Action::Ask);
}

#[test]
fn empty_script_asks_instead_of_allowing() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");

    let verdict = evaluate_script(&record(""), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Ask);
}

#[test]
fn shadowed_rule_is_ignored_and_first_config_stays_the_source_of_truth() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");

    let mut first = rule("rm", Action::Deny);
    first.source = "a.toml".to_string();
    let mut second = rule("rm", Action::Deny);
    second.source = "b.toml".to_string();
    second.shadowed = true;
    second.shadowing = Some("a.toml".to_string());
    merged.rules.push(first);
    merged.rules.push(second);

    let verdict = evaluate_script(&record("rm -rf /tmp/x"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Deny);
    assert_eq!(verdict.source, "a.toml");
}

#[test]
fn most_specific_matching_rule_is_selected() {
    let mut merged = MergedConfig::default();
    merged.policy_default = Tracked::set(Action::Allow, "(default)");
    merged.rules.push(rule("git", Action::Ask));
    let mut specific = rule("git", Action::Deny);
    specific.rule.subcommands = vec!["push".to_string()];
    merged.rules.push(specific);

    let verdict = evaluate_script(&record("git push origin main"), &ctx(), &merged);
    assert_eq!(verdict.action, Action::Deny);
}
