//! Pattern parse errors (§4.1).

use thiserror::Error;

/// Error raised while parsing a single pattern string into a `Pattern`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternParseError {
    #[error("invalid regex 're:{0}': {1}")]
    InvalidRegex(String, String),

    #[error("unterminated 'flags[' bracket in {0:?}")]
    UnterminatedFlagsBracket(String),

    #[error("non-alphanumeric flag character in {0:?}")]
    InvalidFlagChars(String),

    #[error("unknown rule: target {0:?} (expected read, write, or edit)")]
    UnknownRuleTarget(String),

    #[error("negation is not permitted on file-rule-marker pattern {0:?}")]
    NegatedFileRuleMarker(String),

    #[error("unknown alias {0:?}")]
    UnknownAlias(String),
}
