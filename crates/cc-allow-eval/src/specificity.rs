//! CSS-like specificity scoring for bash rules (§4.5): when more than
//! one rule matches a command, the most specific one wins. "Specific"
//! means naming more of the command shape — an exact command name over
//! a wildcard, fixed argument positions, named pipe partners, and so on.

use cc_allow_config::BashRule;
use cc_allow_pattern::BoolExpr;
use cc_allow_pattern::Pattern;

const WILDCARD: &str = "*";

pub fn score(rule: &BashRule) -> u32 {
    let mut score = 0u32;

    if !is_wildcard(&rule.command) {
        score += 100;
    }

    score += 20 * rule.args.position.len() as u32;

    let enumerations = direct_pattern_count(rule.args.any.as_ref())
        + direct_pattern_count(rule.args.all.as_ref())
        + named_pipe_count(&rule.pipe.to);
    score += 10 * enumerations as u32;

    let loose_terms = rule.subcommands.len()
        + direct_pattern_count(rule.args.xor.as_ref())
        + has_wildcard_pipe_from(&rule.pipe.from) as usize;
    score += 5 * loose_terms as u32;

    score
}

fn is_wildcard(pattern: &Pattern) -> bool {
    pattern.literal_text() == Some(WILDCARD)
}

fn direct_pattern_count(expr: Option<&BoolExpr>) -> usize {
    expr.map(BoolExpr::direct_pattern_count).unwrap_or(0)
}

fn named_pipe_count(patterns: &[Pattern]) -> usize {
    patterns.iter().filter(|p| !is_wildcard(p)).count()
}

fn has_wildcard_pipe_from(patterns: &[Pattern]) -> bool {
    patterns.iter().any(is_wildcard)
}

#[cfg(test)]
#[path = "specificity.test.rs"]
mod tests;
