use pretty_assertions::assert_eq;
use std::path::PathBuf;

use super::*;
use crate::PathVars;

fn ctx() -> MatchContext {
    MatchContext::new(
        PathVars::new(
            Some(PathBuf::from("/home/u")),
            Some(PathBuf::from("/project")),
            None,
        ),
        "/project",
    )
}

#[test]
fn literal_matches_exact_string_only() {
    let p = Pattern::parse("rm").unwrap();
    assert!(p.matches("rm", &ctx()));
    assert!(!p.matches("rmdir", &ctx()));
}

#[test]
fn bang_without_known_prefix_is_literal() {
    let p = Pattern::parse("!important").unwrap();
    assert!(p.matches("!important", &ctx()));
    assert!(!p.matches("important", &ctx()));
}

#[test]
fn regex_prefix_compiles_and_matches() {
    let p = Pattern::parse("re:^DROP TABLE").unwrap();
    assert!(p.matches("DROP TABLE users;", &ctx()));
    assert!(!p.matches("select * from users", &ctx()));
}

#[test]
fn negated_regex_inverts_result() {
    let p = Pattern::parse("!re:^DROP").unwrap();
    assert!(!p.matches("DROP TABLE users", &ctx()));
    assert!(p.matches("select 1", &ctx()));
}

#[test]
fn regex_parse_error_is_reported() {
    let err = Pattern::parse("re:(").unwrap_err();
    assert!(matches!(err, PatternParseError::InvalidRegex(_, _)));
}

#[test]
fn path_pattern_matches_raw_doublestar_without_variable() {
    let p = Pattern::parse("path:/tmp/**").unwrap();
    assert!(p.matches("/tmp/tool", &ctx()));
    assert!(!p.matches("/var/tool", &ctx()));
}

#[test]
fn path_pattern_expands_variables_and_resolves_relative_input() {
    let p = Pattern::parse("path:$PROJECT_ROOT/**").unwrap();
    assert!(p.matches("src/main.rs", &ctx()));
}

#[test]
fn path_pattern_without_variable_but_relative_input_does_raw_match_not_resolve() {
    // No variable in the pattern means resolution is skipped even though
    // the input looks path-like; the glob runs against the raw input.
    let p = Pattern::parse("path:src/**").unwrap();
    assert!(p.matches("src/main.rs", &ctx()));
    assert!(!p.matches("/project/src/main.rs", &ctx()));
}

#[test]
fn flag_pattern_default_delim_rejects_double_dash() {
    let p = Pattern::parse("flags:rf").unwrap();
    assert!(p.matches("-rf", &ctx()));
    assert!(p.matches("-fr", &ctx()));
    assert!(!p.matches("--rf", &ctx()));
    assert!(!p.matches("-r", &ctx()));
}

#[test]
fn flag_pattern_custom_delim() {
    let p = Pattern::parse("flags[+]:x").unwrap();
    assert!(p.matches("+x", &ctx()));
    assert!(!p.matches("-x", &ctx()));
}

#[test]
fn flag_pattern_rejects_unterminated_bracket() {
    let err = Pattern::parse("flags[+:x").unwrap_err();
    assert!(matches!(err, PatternParseError::UnterminatedFlagsBracket(_)));
}

#[test]
fn flag_pattern_rejects_non_alphanumeric_chars() {
    let err = Pattern::parse("flags:r-f").unwrap_err();
    assert!(matches!(err, PatternParseError::InvalidFlagChars(_)));
}

#[test]
fn file_rule_marker_always_matches_and_cannot_be_negated() {
    let p = Pattern::parse("rule:write").unwrap();
    assert!(p.matches("anything", &ctx()));
    assert_eq!(p.file_rule_kind(), Some(FileRuleKind::Write));

    let err = Pattern::parse("!rule:write").unwrap_err();
    assert!(matches!(err, PatternParseError::NegatedFileRuleMarker(_)));
}

#[test]
fn unknown_rule_target_is_an_error() {
    let err = Pattern::parse("rule:delete").unwrap_err();
    assert!(matches!(err, PatternParseError::UnknownRuleTarget(_)));
}
