use super::*;
use pretty_assertions::assert_eq;
use crate::PathVars;

fn ctx() -> MatchContext {
    MatchContext::new(PathVars::default(), "/project")
}

#[test]
fn any_match_requires_one_pattern_one_input() {
    let m = Matcher::new(vec![
        Pattern::parse("foo").unwrap(),
        Pattern::parse("bar").unwrap(),
    ]);
    assert!(m.any_match(&["baz", "bar"], &ctx()));
    assert!(!m.any_match(&["baz", "qux"], &ctx()));
}

#[test]
fn all_match_requires_every_pattern_to_find_some_input() {
    let m = Matcher::new(vec![
        Pattern::parse("foo").unwrap(),
        Pattern::parse("bar").unwrap(),
    ]);
    assert!(m.all_match(&["foo", "bar", "baz"], &ctx()));
    assert!(!m.all_match(&["foo", "baz"], &ctx()));
}

#[test]
fn empty_matcher_never_any_matches_but_vacuously_all_matches() {
    let m = Matcher::new(vec![]);
    assert!(!m.any_match(&["x"], &ctx()));
    assert!(m.all_match(&["x"], &ctx()));
}
