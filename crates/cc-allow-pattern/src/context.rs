//! Path-variable expansion context for `path:` pattern matching.

use std::path::Path;
use std::path::PathBuf;

/// The three path variables `path:` patterns may reference.
#[derive(Debug, Clone, Default)]
pub struct PathVars {
    pub home: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    pub claude_plugin_root: Option<PathBuf>,
}

impl PathVars {
    pub fn new(
        home: Option<PathBuf>,
        project_root: Option<PathBuf>,
        claude_plugin_root: Option<PathBuf>,
    ) -> Self {
        Self {
            home,
            project_root,
            claude_plugin_root,
        }
    }

    /// Expand `$HOME`, `$PROJECT_ROOT`, `$CLAUDE_PLUGIN_ROOT` occurrences in
    /// `pattern`, leaving unknown/unset variables untouched so a missing
    /// binding never silently matches everything.
    pub fn expand(&self, pattern: &str) -> String {
        let mut out = pattern.to_string();
        if let Some(home) = &self.home {
            out = out.replace("$HOME", &home.to_string_lossy());
        }
        if let Some(root) = &self.project_root {
            out = out.replace("$PROJECT_ROOT", &root.to_string_lossy());
        }
        if let Some(root) = &self.claude_plugin_root {
            out = out.replace("$CLAUDE_PLUGIN_ROOT", &root.to_string_lossy());
        }
        out
    }

    /// `true` if `pattern` references any of the three variables.
    pub fn contains_variable(pattern: &str) -> bool {
        pattern.contains("$HOME")
            || pattern.contains("$PROJECT_ROOT")
            || pattern.contains("$CLAUDE_PLUGIN_ROOT")
    }
}

/// Context threaded through every [`crate::Pattern::matches`] call.
///
/// Carries the working directory and path-variable bindings needed to
/// resolve and expand `path:` patterns. `cwd` is the *effective* working
/// directory for the command currently being checked (post `cd` tracking),
/// not necessarily the process's own cwd.
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    pub vars: PathVars,
    pub cwd: PathBuf,
}

impl MatchContext {
    pub fn new(vars: PathVars, cwd: impl Into<PathBuf>) -> Self {
        Self {
            vars,
            cwd: cwd.into(),
        }
    }

    /// `true` if `input` looks like a filesystem path: starts with `/`,
    /// `./`, `../`, `~`, or matches a Windows drive prefix (`C:\`, `C:/`).
    pub fn looks_path_like(input: &str) -> bool {
        if input.starts_with('/')
            || input.starts_with("./")
            || input.starts_with("../")
            || input.starts_with('~')
        {
            return true;
        }
        let bytes = input.as_bytes();
        bytes.len() >= 3
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && (bytes[2] == b'\\' || bytes[2] == b'/')
    }

    /// Resolve `input` to an absolute, lexically-cleaned path using `cwd`
    /// and `$HOME` (for a leading `~`).
    pub fn resolve_absolute(&self, input: &str) -> PathBuf {
        let expanded = if let Some(rest) = input.strip_prefix('~') {
            match &self.vars.home {
                Some(home) => {
                    let rest = rest.strip_prefix('/').unwrap_or(rest);
                    if rest.is_empty() {
                        home.clone()
                    } else {
                        home.join(rest)
                    }
                }
                None => PathBuf::from(input),
            }
        } else {
            PathBuf::from(input)
        };

        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        };

        clean_path(&absolute)
    }
}

/// Lexically normalize `.`/`..` components without touching the
/// filesystem (mirrors `filepath.Clean`/`path::clean` style helpers used
/// throughout the corpus for cwd tracking).
pub fn clean_path(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                match out.last() {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir) | None => {
                        // Can't go above root; drop a leading ".." silently
                        // for absolute paths, keep it for relative ones.
                        if path.is_relative() {
                            out.push(component);
                        }
                    }
                    _ => out.push(component),
                }
            }
            other => out.push(other),
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
#[path = "context.test.rs"]
mod tests;
