//! Typed patterns parsed from the raw strings config files carry (§4.1).

use std::collections::BTreeSet;

use cc_allow_error::PatternParseError;
use regex::Regex;

use crate::context::MatchContext;

/// The tool an `rule:` file-rule-marker delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRuleKind {
    Read,
    Write,
    Edit,
}

impl FileRuleKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "read" => Some(Self::Read),
            "write" => Some(Self::Write),
            "edit" => Some(Self::Edit),
            _ => None,
        }
    }
}

/// A single compiled pattern (§3 "Pattern").
///
/// Every variant carries its own `negate` flag; negation is applied after
/// the underlying predicate, and is rejected at parse time for `literal`
/// and `rule:` inputs (§4.1, §3 invariant on negation).
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal {
        raw: String,
    },
    Regex {
        raw: String,
        compiled: Regex,
        negate: bool,
    },
    Path {
        raw: String,
        negate: bool,
    },
    Flag {
        delim: char,
        chars: BTreeSet<char>,
        negate: bool,
    },
    FileRuleMarker {
        kind: FileRuleKind,
    },
}

impl Pattern {
    /// Parse one raw pattern string (§4.1 "Parsing rules").
    pub fn parse(raw: &str) -> Result<Pattern, PatternParseError> {
        let (negate, body) = strip_negation(raw);

        if let Some(rest) = body.strip_prefix("re:") {
            let compiled = Regex::new(rest)
                .map_err(|e| PatternParseError::InvalidRegex(rest.to_string(), e.to_string()))?;
            return Ok(Pattern::Regex {
                raw: rest.to_string(),
                compiled,
                negate,
            });
        }

        if let Some(rest) = body.strip_prefix("path:") {
            return Ok(Pattern::Path {
                raw: rest.to_string(),
                negate,
            });
        }

        if let Some(rest) = body.strip_prefix("flags[") {
            let close = rest
                .find(']')
                .ok_or_else(|| PatternParseError::UnterminatedFlagsBracket(raw.to_string()))?;
            let delim_str = &rest[..close];
            let delim = delim_str
                .chars()
                .next()
                .ok_or_else(|| PatternParseError::UnterminatedFlagsBracket(raw.to_string()))?;
            let rest = &rest[close + 1..];
            let chars_str = rest
                .strip_prefix(':')
                .ok_or_else(|| PatternParseError::UnterminatedFlagsBracket(raw.to_string()))?;
            let chars = parse_flag_chars(chars_str, raw)?;
            return Ok(Pattern::Flag {
                delim,
                chars,
                negate,
            });
        }

        if let Some(rest) = body.strip_prefix("flags:") {
            let chars = parse_flag_chars(rest, raw)?;
            return Ok(Pattern::Flag {
                delim: '-',
                chars,
                negate,
            });
        }

        if let Some(rest) = body.strip_prefix("rule:") {
            if negate {
                return Err(PatternParseError::NegatedFileRuleMarker(raw.to_string()));
            }
            let kind = FileRuleKind::parse(rest)
                .ok_or_else(|| PatternParseError::UnknownRuleTarget(rest.to_string()))?;
            return Ok(Pattern::FileRuleMarker { kind });
        }

        // No recognized prefix: literal. `body` equals `raw` verbatim here
        // (including a leading "!") because `strip_negation` only strips
        // the "!" when it precedes a recognized prefix (§4.1).
        debug_assert!(!negate);
        Ok(Pattern::Literal {
            raw: body.to_string(),
        })
    }

    /// Evaluate this pattern against a single string input.
    pub fn matches(&self, input: &str, ctx: &MatchContext) -> bool {
        match self {
            Pattern::Literal { raw } => input == raw,
            Pattern::Regex {
                compiled, negate, ..
            } => negate_if(*negate, compiled.is_match(input)),
            Pattern::Path { raw, negate } => negate_if(*negate, match_path(raw, input, ctx)),
            Pattern::Flag {
                delim,
                chars,
                negate,
            } => negate_if(*negate, match_flag(*delim, chars, input)),
            Pattern::FileRuleMarker { .. } => true,
        }
    }

    /// `true` for the `rule:` marker, with the tool it delegates to.
    pub fn file_rule_kind(&self) -> Option<FileRuleKind> {
        match self {
            Pattern::FileRuleMarker { kind } => Some(*kind),
            _ => None,
        }
    }

    /// The raw literal text, for call sites that need to compare a
    /// `literal` pattern against a basename or resolved path directly
    /// (command-list / command-pattern matching, §3 invariant on
    /// `CommandsList`).
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            Pattern::Literal { raw } => Some(raw),
            _ => None,
        }
    }

    pub fn is_path_pattern(&self) -> bool {
        matches!(self, Pattern::Path { .. })
    }

    pub fn path_raw(&self) -> Option<&str> {
        match self {
            Pattern::Path { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

fn negate_if(negate: bool, result: bool) -> bool {
    if negate {
        !result
    } else {
        result
    }
}

/// Strip a leading `!` only if the remainder begins with a recognized
/// prefix (`re:`, `path:`, `flags:`, `flags[`, `rule:`); otherwise the `!`
/// is literal text and is left untouched.
fn strip_negation(raw: &str) -> (bool, &str) {
    if let Some(rest) = raw.strip_prefix('!') {
        if starts_with_known_prefix(rest) {
            return (true, rest);
        }
    }
    (false, raw)
}

fn starts_with_known_prefix(s: &str) -> bool {
    s.starts_with("re:")
        || s.starts_with("path:")
        || s.starts_with("flags:")
        || s.starts_with("flags[")
        || s.starts_with("rule:")
}

fn parse_flag_chars(chars_str: &str, raw: &str) -> Result<BTreeSet<char>, PatternParseError> {
    if chars_str.is_empty() || !chars_str.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PatternParseError::InvalidFlagChars(raw.to_string()));
    }
    Ok(chars_str.chars().collect())
}

fn match_flag(delim: char, chars: &BTreeSet<char>, input: &str) -> bool {
    let Some(rest) = input.strip_prefix(delim) else {
        return false;
    };
    if delim == '-' && rest.starts_with('-') {
        return false;
    }
    chars.iter().all(|c| rest.contains(*c))
}

fn match_path(raw: &str, input: &str, ctx: &MatchContext) -> bool {
    let has_var = crate::PathVars::contains_variable(raw);
    if has_var && MatchContext::looks_path_like(input) {
        let expanded = ctx.vars.expand(raw);
        let resolved = ctx.resolve_absolute(input);
        return doublestar_match(&expanded, &resolved.to_string_lossy());
    }
    doublestar_match(raw, input)
}

fn doublestar_match(glob: &str, input: &str) -> bool {
    match globset::Glob::new(glob) {
        Ok(g) => g.compile_matcher().is_match(input),
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "pattern.test.rs"]
mod tests;
