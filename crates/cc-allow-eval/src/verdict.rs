//! The outcome of evaluating one tool call against a [`cc_allow_config::MergedConfig`].

use cc_allow_pattern::Action;

/// A decision plus the (still-templated) message and the config source
/// that produced it, for `--debug`/`--check` diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub action: Action,
    pub message: String,
    pub source: String,
}

impl Verdict {
    pub fn new(action: Action, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
            source: source.into(),
        }
    }
}
