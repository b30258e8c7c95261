//! The three-valued verdict and its strictness ordering.

use serde::Deserialize;
use serde::Serialize;

/// A permission verdict: allow, deny, or ask.
///
/// Ordered by strictness: `Deny > Ask > Allow`. This ordering underlies
/// both the config merger's stricter-wins rule and the rule evaluator's
/// `combine_strict`/`combine_defer` composition laws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Allow,
    Ask,
    Deny,
}

impl Action {
    /// Numeric priority: higher is stricter. `Deny` (2) > `Ask` (1) > `Allow` (0).
    pub fn priority(self) -> u8 {
        match self {
            Action::Allow => 0,
            Action::Ask => 1,
            Action::Deny => 2,
        }
    }

    /// Same ordering as [`priority`](Self::priority), exposed under the
    /// spec's "strictness" name for call sites that reason about merge
    /// semantics rather than evaluation outcomes.
    pub fn strictness(self) -> u8 {
        self.priority()
    }

    /// `true` if `self` is strictly stricter than `other`.
    pub fn is_stricter_than(self, other: Action) -> bool {
        self.priority() > other.priority()
    }

    /// The stricter of two actions; ties keep `self`.
    pub fn max_strictness(self, other: Action) -> Action {
        if other.is_stricter_than(self) {
            other
        } else {
            self
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::Ask
    }
}

#[cfg(test)]
#[path = "action.test.rs"]
mod tests;
