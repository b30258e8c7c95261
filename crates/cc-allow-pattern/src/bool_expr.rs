//! Boolean expressions over argument vectors (§3 "BoolExpr").

use std::collections::BTreeMap;

use crate::context::MatchContext;
use crate::pattern::Pattern;

/// A recursive boolean expression over an argument vector.
///
/// - [`BoolExpr::Patterns`] is the base leaf: "a pattern matches an
///   argument vector iff some argument matches the pattern", applied to
///   every pattern in the list and OR'd together.
/// - [`BoolExpr::Sequence`] is the other leaf shape: a map of
///   position→pattern-list that must all match adjacent positions in a
///   sliding window over the argument vector.
/// - `any`/`all`/`not`/`xor` combine child expressions. Nesting a
///   `Patterns` leaf directly under `all` reproduces "all requires each
///   pattern to find some matching argument", because each pattern
///   evaluated alone via the leaf rule is ANDed with its siblings.
#[derive(Debug, Clone)]
pub enum BoolExpr {
    Any(Vec<BoolExpr>),
    All(Vec<BoolExpr>),
    Not(Box<BoolExpr>),
    Xor(Vec<BoolExpr>),
    Patterns(Vec<Pattern>),
    Sequence(BTreeMap<usize, Vec<Pattern>>),
}

impl BoolExpr {
    /// Evaluate this expression against an argument vector.
    pub fn eval(&self, args: &[String], ctx: &MatchContext) -> bool {
        match self {
            BoolExpr::Any(children) => children.iter().any(|c| c.eval(args, ctx)),
            BoolExpr::All(children) => children.iter().all(|c| c.eval(args, ctx)),
            BoolExpr::Not(child) => !child.eval(args, ctx),
            BoolExpr::Xor(children) => {
                children.iter().filter(|c| c.eval(args, ctx)).count() == 1
            }
            BoolExpr::Patterns(patterns) => patterns
                .iter()
                .any(|p| args.iter().any(|a| p.matches(a, ctx))),
            BoolExpr::Sequence(positions) => eval_sequence(positions, args, ctx),
        }
    }

    /// Number of leaf patterns this expression directly enumerates,
    /// without descending through nested operators — used by the
    /// specificity score's `|position-free pattern enumerations|` term.
    pub fn direct_pattern_count(&self) -> usize {
        match self {
            BoolExpr::Patterns(patterns) => patterns.len(),
            _ => 0,
        }
    }

    /// Structural equality used by shadow detection (§4.2): same shape,
    /// same pattern list contents (order-sensitive), same map keys.
    pub fn structurally_eq(&self, other: &BoolExpr) -> bool {
        match (self, other) {
            (BoolExpr::Any(a), BoolExpr::Any(b))
            | (BoolExpr::All(a), BoolExpr::All(b))
            | (BoolExpr::Xor(a), BoolExpr::Xor(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.structurally_eq(y))
            }
            (BoolExpr::Not(a), BoolExpr::Not(b)) => a.structurally_eq(b),
            (BoolExpr::Patterns(a), BoolExpr::Patterns(b)) => patterns_eq(a, b),
            (BoolExpr::Sequence(a), BoolExpr::Sequence(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|((pa, la), (pb, lb))| {
                        pa == pb && patterns_eq(la, lb)
                    })
            }
            _ => false,
        }
    }
}

fn patterns_eq(a: &[Pattern], b: &[Pattern]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| pattern_source(x) == pattern_source(y))
}

/// A stable textual fingerprint of a pattern, used only for structural
/// equality (shadow detection), never for matching.
fn pattern_source(p: &Pattern) -> String {
    format!("{p:?}")
}

fn eval_sequence(
    positions: &BTreeMap<usize, Vec<Pattern>>,
    args: &[String],
    ctx: &MatchContext,
) -> bool {
    let Some(&max_pos) = positions.keys().max() else {
        return false;
    };
    let width = max_pos + 1;
    if args.len() < width {
        return false;
    }

    for start in 0..=(args.len() - width) {
        let window_matches = positions.iter().all(|(pos, patterns)| {
            let arg = &args[start + pos];
            patterns.iter().any(|p| p.matches(arg, ctx))
        });
        if window_matches {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "bool_expr.test.rs"]
mod tests;
