//! Shell AST parse errors (§4.3).

use thiserror::Error;

/// Error surfaced when the external Bash parser cannot produce an AST for
/// the input command string. Per spec, this degrades a Bash evaluation to
/// `deny` rather than propagating as a process-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse shell command: {message}")]
pub struct AstParseError {
    pub message: String,
}

impl AstParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
