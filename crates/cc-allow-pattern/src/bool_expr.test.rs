use super::*;
use pretty_assertions::assert_eq;
use crate::PathVars;
use crate::Pattern;

fn ctx() -> MatchContext {
    MatchContext::new(PathVars::default(), "/project")
}

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn pat(s: &str) -> Pattern {
    Pattern::parse(s).unwrap()
}

#[test]
fn patterns_leaf_is_exists_semantics() {
    let expr = BoolExpr::Patterns(vec![pat("--force")]);
    assert!(expr.eval(&args(&["rm", "--force", "x"]), &ctx()));
    assert!(!expr.eval(&args(&["rm", "x"]), &ctx()));
}

#[test]
fn all_requires_each_pattern_to_independently_match_some_arg() {
    let expr = BoolExpr::All(vec![
        BoolExpr::Patterns(vec![pat("a")]),
        BoolExpr::Patterns(vec![pat("b")]),
    ]);
    assert!(expr.eval(&args(&["a", "b"]), &ctx()));
    assert!(!expr.eval(&args(&["a"]), &ctx()));
}

#[test]
fn any_short_circuits_on_first_match() {
    let expr = BoolExpr::Any(vec![
        BoolExpr::Patterns(vec![pat("a")]),
        BoolExpr::Patterns(vec![pat("b")]),
    ]);
    assert!(expr.eval(&args(&["a"]), &ctx()));
    assert!(!expr.eval(&args(&["c"]), &ctx()));
}

#[test]
fn not_inverts_child() {
    let expr = BoolExpr::Not(Box::new(BoolExpr::Patterns(vec![pat("a")])));
    assert!(!expr.eval(&args(&["a"]), &ctx()));
    assert!(expr.eval(&args(&["b"]), &ctx()));
}

#[test]
fn xor_requires_exactly_one_child() {
    let expr = BoolExpr::Xor(vec![
        BoolExpr::Patterns(vec![pat("a")]),
        BoolExpr::Patterns(vec![pat("b")]),
    ]);
    assert!(expr.eval(&args(&["a"]), &ctx()));
    assert!(!expr.eval(&args(&["a", "b"]), &ctx()));
    assert!(!expr.eval(&args(&["c"]), &ctx()));
}

#[test]
fn sequence_matches_adjacent_positions_in_sliding_window() {
    let mut positions = std::collections::BTreeMap::new();
    positions.insert(0usize, vec![pat("git")]);
    positions.insert(1usize, vec![pat("push")]);
    let expr = BoolExpr::Sequence(positions);

    assert!(expr.eval(&args(&["echo", "git", "push", "--force"]), &ctx()));
    assert!(!expr.eval(&args(&["git", "status"]), &ctx()));
}

#[test]
fn empty_args_never_satisfy_nonempty_patterns_leaf() {
    let expr = BoolExpr::Patterns(vec![pat("a")]);
    assert!(!expr.eval(&[], &ctx()));
}

#[test]
fn structural_equality_is_order_sensitive() {
    let a = BoolExpr::Any(vec![
        BoolExpr::Patterns(vec![pat("a")]),
        BoolExpr::Patterns(vec![pat("b")]),
    ]);
    let b = BoolExpr::Any(vec![
        BoolExpr::Patterns(vec![pat("b")]),
        BoolExpr::Patterns(vec![pat("a")]),
    ]);
    assert!(!a.structurally_eq(&b));

    let c = BoolExpr::Any(vec![
        BoolExpr::Patterns(vec![pat("a")]),
        BoolExpr::Patterns(vec![pat("b")]),
    ]);
    assert!(a.structurally_eq(&c));
}
