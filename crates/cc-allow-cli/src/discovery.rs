//! Config-file discovery (§6 "Config file layout"): finds every optional
//! config source, loosest first, and folds them with [`cc_allow_config::merge`].

use std::path::Path;
use std::path::PathBuf;

use cc_allow_config::MergedConfig;
use cc_allow_error::ConfigLoadError;

const GLOBAL_CONFIG: &str = "cc-allow.toml";
const PROJECT_CONFIG: &str = ".claude/cc-allow.toml";
const PROJECT_LOCAL_CONFIG: &str = ".claude/cc-allow.local.toml";

/// The discovered config sources, loosest to strictest, before any of
/// them has been read.
pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    if let Some(home) = dirs::home_dir() {
        sources.push(home.join(".config").join(GLOBAL_CONFIG));
    }
    if let Some(project_root) = find_ancestor_with(cwd, PROJECT_CONFIG) {
        sources.push(project_root.join(PROJECT_CONFIG));
    }
    if let Some(project_root) = find_ancestor_with(cwd, PROJECT_LOCAL_CONFIG) {
        sources.push(project_root.join(PROJECT_LOCAL_CONFIG));
    }
    if let Some(explicit) = explicit {
        sources.push(explicit.to_path_buf());
    }

    sources
}

/// Walk `cwd` and its ancestors looking for a directory containing
/// `relative`, returning that ancestor directory (not the file itself).
fn find_ancestor_with(cwd: &Path, relative: &str) -> Option<PathBuf> {
    let mut dir = cwd;
    loop {
        if dir.join(relative).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// The project root a `$PROJECT_ROOT` pattern variable binds to: the
/// nearest ancestor with a `.claude` directory, falling back to the
/// nearest ancestor with `.git`.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    find_ancestor_dir(cwd, ".claude").or_else(|| find_ancestor_dir(cwd, ".git"))
}

fn find_ancestor_dir(cwd: &Path, name: &str) -> Option<PathBuf> {
    let mut dir = cwd;
    loop {
        if dir.join(name).exists() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Load and merge every existing source in `sources`. A missing file is
/// silently skipped (§6: "every file is optional"); any other read or
/// validation failure is fatal.
pub fn load_and_merge(sources: &[PathBuf]) -> Result<MergedConfig, ConfigLoadError> {
    let mut configs = Vec::with_capacity(sources.len());
    for path in sources {
        if !path.is_file() {
            continue;
        }
        configs.push(cc_allow_config::load_file(path.clone())?);
    }

    let mut merged = cc_allow_config::merge(&configs);
    cc_allow_config::apply_defaults(&mut merged);
    Ok(merged)
}

#[cfg(test)]
#[path = "discovery.test.rs"]
mod tests;
