//! A reusable wrapper around a pattern list (§4.1 "Matcher").

use crate::context::MatchContext;
use crate::pattern::Pattern;

/// Wraps a list of parsed patterns and offers the two aggregate predicates
/// every higher-level list (command allow/deny lists, file path lists,
/// flat `BoolExpr` leaves) is built from.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    patterns: Vec<Pattern>,
}

impl Matcher {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `true` iff some pattern matches some input.
    pub fn any_match(&self, inputs: &[impl AsRef<str>], ctx: &MatchContext) -> bool {
        self.patterns
            .iter()
            .any(|p| inputs.iter().any(|i| p.matches(i.as_ref(), ctx)))
    }

    /// `true` iff every pattern matches some input (not necessarily the
    /// same one).
    pub fn all_match(&self, inputs: &[impl AsRef<str>], ctx: &MatchContext) -> bool {
        self.patterns
            .iter()
            .all(|p| inputs.iter().any(|i| p.matches(i.as_ref(), ctx)))
    }

    /// `true` iff some pattern matches this single input.
    pub fn matches_one(&self, input: &str, ctx: &MatchContext) -> bool {
        self.patterns.iter().any(|p| p.matches(input, ctx))
    }
}

#[cfg(test)]
#[path = "matcher.test.rs"]
mod tests;
