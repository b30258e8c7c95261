use super::*;
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn missing_directory_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");
    assert_eq!(cleanup_stale_sessions(&missing, Duration::from_secs(60)), 0);
}

#[test]
fn ignores_non_toml_files() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "keep me").unwrap();

    let removed = cleanup_stale_sessions(tmp.path(), Duration::from_secs(0));
    assert_eq!(removed, 0);
    assert!(tmp.path().join("notes.txt").exists());
}

#[test]
fn removes_toml_files_older_than_retention() {
    let tmp = tempfile::tempdir().unwrap();
    let session = tmp.path().join("abc123.toml");
    std::fs::write(&session, "").unwrap();

    let removed = cleanup_stale_sessions(tmp.path(), Duration::from_secs(0));
    assert_eq!(removed, 1);
    assert!(!session.exists());
}

#[test]
fn keeps_toml_files_within_retention() {
    let tmp = tempfile::tempdir().unwrap();
    let session = tmp.path().join("abc123.toml");
    std::fs::write(&session, "").unwrap();

    let removed = cleanup_stale_sessions(tmp.path(), Duration::from_secs(3600));
    assert_eq!(removed, 0);
    assert!(session.exists());
}
