//! Configuration load and validation errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while locating or parsing a config file from disk.
///
/// A missing file is never represented here: discovery silently skips
/// absent files (per spec, "every file is optional"). This type only
/// covers files that exist but cannot be turned into a `Config`.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file exists but is not valid UTF-8 or could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML.
    #[error("malformed TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file is valid TOML but fails semantic validation (bad patterns,
    /// unknown alias references, legacy v1 schema, ...).
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
}

/// A single semantic validation failure, with the dotted field path that
/// produced it so the fatal message can point the user at the exact line.
#[derive(Debug, Error)]
#[error("{path}: invalid value {value:?}: {reason}")]
pub struct ConfigValidationError {
    /// Path to the offending config file.
    pub file: PathBuf,
    /// Dotted field path within the file, e.g. "bash.rules.deny[2].args.any".
    pub path: String,
    /// The offending raw value.
    pub value: String,
    /// Human-readable cause.
    pub reason: String,
}

impl ConfigValidationError {
    pub fn new(
        file: impl Into<PathBuf>,
        path: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            path: path.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
