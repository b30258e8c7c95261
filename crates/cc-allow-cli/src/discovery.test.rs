use super::*;
use pretty_assertions::assert_eq;

#[test]
fn finds_nearest_ancestor_claude_dir_as_project_root() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    let nested = project.join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::create_dir_all(project.join(".claude")).unwrap();

    let root = find_project_root(&nested).unwrap();
    assert_eq!(root, project);
}

#[test]
fn falls_back_to_git_when_no_claude_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(project.join("src")).unwrap();
    std::fs::create_dir_all(project.join(".git")).unwrap();

    let root = find_project_root(&project.join("src")).unwrap();
    assert_eq!(root, project);
}

#[test]
fn discover_includes_ancestor_project_config_when_present() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    let nested = project.join("src");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::create_dir_all(project.join(".claude")).unwrap();
    std::fs::write(project.join(".claude/cc-allow.toml"), "version = 2\n").unwrap();

    let sources = discover(&nested, None);
    assert!(sources.iter().any(|p| p.ends_with(".claude/cc-allow.toml")));
}

#[test]
fn discover_appends_explicit_override_last() {
    let tmp = tempfile::tempdir().unwrap();
    let explicit = tmp.path().join("override.toml");
    let sources = discover(tmp.path(), Some(&explicit));
    assert_eq!(sources.last(), Some(&explicit));
}

#[test]
fn load_and_merge_skips_missing_files_without_error() {
    let merged = load_and_merge(&[PathBuf::from("/nonexistent/cc-allow.toml")]).unwrap();
    assert_eq!(merged.policy_default.cloned_value(), Some(cc_allow_pattern::Action::Ask));
}
