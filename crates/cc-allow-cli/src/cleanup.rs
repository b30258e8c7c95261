//! Best-effort session-file maintenance (§5, last paragraph): deletes
//! session TOML files older than a configured age from a well-known
//! directory. Never blocks a decision and tolerates every I/O error, the
//! same discipline as the teacher's `exec/shell/src/snapshot/cleanup.rs`
//! — ported to synchronous `std::fs` since the decision path here has no
//! async runtime (§5).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use std::time::SystemTime;

/// Remove `*.toml` session files under `session_dir` whose last-modified
/// time is older than `retention`. Returns the number removed; any
/// per-entry I/O error is logged and skipped rather than propagated.
pub fn cleanup_stale_sessions(session_dir: &Path, retention: Duration) -> usize {
    let entries = match fs::read_dir(session_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return 0,
        Err(err) => {
            tracing::warn!("failed to read session directory {session_dir:?}: {err}");
            return 0;
        }
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                tracing::warn!("failed to stat session file {path:?}: {err}");
                continue;
            }
        };

        let Ok(age) = now.duration_since(modified) else {
            continue;
        };
        if age < retention {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => tracing::warn!("failed to remove stale session file {path:?}: {err}"),
        }
    }

    removed
}

#[cfg(test)]
#[path = "cleanup.test.rs"]
mod tests;
