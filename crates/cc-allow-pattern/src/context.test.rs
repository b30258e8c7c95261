use pretty_assertions::assert_eq;
use std::path::PathBuf;

use super::*;

#[test]
fn expand_replaces_known_variables() {
    let vars = PathVars::new(
        Some(PathBuf::from("/home/u")),
        Some(PathBuf::from("/proj")),
        None,
    );
    assert_eq!(vars.expand("$HOME/bin/**"), "/home/u/bin/**");
    assert_eq!(vars.expand("$PROJECT_ROOT/**"), "/proj/**");
    assert_eq!(vars.expand("$CLAUDE_PLUGIN_ROOT/x"), "$CLAUDE_PLUGIN_ROOT/x");
}

#[test]
fn looks_path_like_covers_all_forms() {
    assert!(MatchContext::looks_path_like("/etc/passwd"));
    assert!(MatchContext::looks_path_like("./x"));
    assert!(MatchContext::looks_path_like("../x"));
    assert!(MatchContext::looks_path_like("~/x"));
    assert!(MatchContext::looks_path_like("C:\\x"));
    assert!(!MatchContext::looks_path_like("rm"));
    assert!(!MatchContext::looks_path_like("-rf"));
}

#[test]
fn resolve_absolute_joins_relative_to_cwd() {
    let ctx = MatchContext::new(PathVars::default(), "/project");
    assert_eq!(ctx.resolve_absolute("src/main.rs"), PathBuf::from("/project/src/main.rs"));
    assert_eq!(ctx.resolve_absolute("/etc/passwd"), PathBuf::from("/etc/passwd"));
}

#[test]
fn resolve_absolute_expands_tilde_via_home() {
    let vars = PathVars::new(Some(PathBuf::from("/home/u")), None, None);
    let ctx = MatchContext::new(vars, "/project");
    assert_eq!(ctx.resolve_absolute("~/x"), PathBuf::from("/home/u/x"));
    assert_eq!(ctx.resolve_absolute("~"), PathBuf::from("/home/u"));
}

#[test]
fn clean_path_collapses_dot_dot() {
    assert_eq!(clean_path(&PathBuf::from("/a/b/../c")), PathBuf::from("/a/c"));
    assert_eq!(clean_path(&PathBuf::from("/a/./b")), PathBuf::from("/a/b"));
    assert_eq!(clean_path(&PathBuf::from("/../a")), PathBuf::from("/a"));
}
