//! Command name resolution against shell builtins and `$PATH` (§4.4).

use std::path::Path;
use std::path::PathBuf;

/// The closed set of POSIX/Bash builtins the walker never expects to find
/// on disk. Kept deliberately small: only names that change how a rule
/// should be matched (file-access builtins, shell state mutators), not
/// an exhaustive builtin list.
const BUILTINS: &[&str] = &[
    "cd", "pwd", "echo", "printf", "export", "unset", "set", "local", "readonly", "source", ".",
    "eval", "exec", "exit", "return", "shift", "trap", "umask", "wait", "read", "alias",
    "unalias", "declare", "typeset", "let", "test", "[", "[[", "true", "false", ":", "break",
    "continue", "fg", "bg", "jobs", "kill", "history", "ulimit", "times", "type", "hash",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand {
    /// A shell builtin; never looked up on `$PATH`.
    Builtin,
    /// An absolute or relative path was given directly (`./script.sh`,
    /// `/usr/bin/env`), bypassing `$PATH` search.
    ExplicitPath(PathBuf),
    /// A bare name resolved against `$PATH` (or the configured allowed
    /// paths) to a concrete file.
    OnPath(PathBuf),
    /// A bare name that could not be found anywhere searched.
    Unresolved,
}

impl ResolvedCommand {
    pub fn resolved_path(&self) -> Option<&Path> {
        match self {
            ResolvedCommand::ExplicitPath(p) | ResolvedCommand::OnPath(p) => Some(p),
            _ => None,
        }
    }
}

/// Resolves a command name the way a shell would before executing it.
pub struct CommandResolver {
    allowed_paths: Option<Vec<PathBuf>>,
}

impl CommandResolver {
    /// Resolve using the process's own `$PATH`.
    pub fn new() -> Self {
        Self {
            allowed_paths: None,
        }
    }

    /// Resolve only against an explicit directory list, ignoring the
    /// process `$PATH` entirely — used when a config scopes down which
    /// directories are trusted to supply executables.
    pub fn with_allowed_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            allowed_paths: Some(paths),
        }
    }

    pub fn resolve(&self, name: &str, cwd: &Path) -> ResolvedCommand {
        if BUILTINS.contains(&name) {
            return ResolvedCommand::Builtin;
        }

        if name.contains('/') {
            let candidate = if Path::new(name).is_absolute() {
                PathBuf::from(name)
            } else {
                cwd.join(name)
            };
            return ResolvedCommand::ExplicitPath(candidate);
        }

        match &self.allowed_paths {
            Some(dirs) => {
                let path_env = std::env::join_paths(dirs).unwrap_or_default();
                match which::which_in(name, Some(path_env), cwd) {
                    Ok(found) => ResolvedCommand::OnPath(found),
                    Err(_) => ResolvedCommand::Unresolved,
                }
            }
            None => match which::which_in(
                name,
                std::env::var_os("PATH"),
                cwd,
            ) {
                Ok(found) => ResolvedCommand::OnPath(found),
                Err(_) => ResolvedCommand::Unresolved,
            },
        }
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "resolve.test.rs"]
mod tests;
