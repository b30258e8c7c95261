use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builtins_never_touch_the_filesystem() {
    let resolver = CommandResolver::new();
    assert_eq!(
        resolver.resolve("cd", Path::new("/tmp")),
        ResolvedCommand::Builtin
    );
}

#[test]
fn absolute_path_is_explicit() {
    let resolver = CommandResolver::new();
    let resolved = resolver.resolve("/bin/ls", Path::new("/tmp"));
    assert_eq!(resolved, ResolvedCommand::ExplicitPath(PathBuf::from("/bin/ls")));
}

#[test]
fn relative_path_is_joined_against_cwd() {
    let resolver = CommandResolver::new();
    let resolved = resolver.resolve("./script.sh", Path::new("/home/user/project"));
    assert_eq!(
        resolved,
        ResolvedCommand::ExplicitPath(PathBuf::from("/home/user/project/./script.sh"))
    );
}

#[test]
fn unknown_bare_name_with_no_allowed_paths_is_unresolved_or_on_path() {
    let resolver = CommandResolver::with_allowed_paths(vec![PathBuf::from("/nonexistent-dir")]);
    let resolved = resolver.resolve("definitely-not-a-real-binary-xyz", Path::new("/tmp"));
    assert_eq!(resolved, ResolvedCommand::Unresolved);
}
