use super::*;
use pretty_assertions::assert_eq;
use cc_allow_config::ArgsMatch;
use cc_allow_config::PipeContext;
use cc_allow_pattern::Action;

fn rule(command: &str) -> BashRule {
    BashRule {
        command: Pattern::parse(command).unwrap(),
        subcommands: Vec::new(),
        action: Action::Ask,
        message: String::new(),
        args: ArgsMatch::default(),
        pipe: PipeContext::default(),
        respect_file_rules: None,
        file_access_type: None,
    }
}

#[test]
fn wildcard_command_scores_lower_than_named_command() {
    assert!(score(&rule("*")) < score(&rule("curl")));
}

#[test]
fn fixed_position_adds_to_score() {
    let plain = rule("git");
    let mut positioned = rule("git");
    positioned
        .args
        .position
        .insert(0, vec![Pattern::parse("push").unwrap()]);
    assert!(score(&positioned) > score(&plain));
}

#[test]
fn named_pipe_target_outscores_wildcard_pipe_target() {
    let mut wildcard_pipe = rule("curl");
    wildcard_pipe.pipe.to = vec![Pattern::parse("*").unwrap()];
    let mut named_pipe = rule("curl");
    named_pipe.pipe.to = vec![Pattern::parse("bash").unwrap()];
    assert!(score(&named_pipe) > score(&wildcard_pipe));
}

#[test]
fn subcommand_enumeration_adds_a_small_bonus() {
    let plain = rule("npm");
    let mut with_subcommands = rule("npm");
    with_subcommands.subcommands = vec!["install".to_string()];
    assert!(score(&with_subcommands) > score(&plain));
}
