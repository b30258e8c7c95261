//! The two verdict-composition laws (§4.5): `combine_strict` merges
//! several matches found within one evaluation pass by picking the
//! strictest; `combine_defer` walks a cascade of sources (e.g. several
//! config layers' independent deny/allow lists) treating `Ask` as a
//! placeholder that never overrides a decisive verdict from either side.

use cc_allow_pattern::Action;

/// Max-strictness combination: Deny beats Ask beats Allow, regardless of
/// which side it came from.
pub fn combine_strict(a: Action, b: Action) -> Action {
    a.max_strictness(b)
}

/// Cascading combination where `Ask` is neutral: if either side is
/// `Ask`, the other side wins outright (even if that side is a weaker
/// `Allow`). If both sides are decisive, the stricter one wins as usual.
pub fn combine_defer(a: Action, b: Action) -> Action {
    match (a, b) {
        (Action::Ask, other) | (other, Action::Ask) => other,
        _ => a.max_strictness(b),
    }
}

#[cfg(test)]
#[path = "compose.test.rs"]
mod tests;
