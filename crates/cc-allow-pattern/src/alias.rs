//! Alias resolution for `alias:name` patterns (§3 "Alias").

use std::collections::HashMap;

use cc_allow_error::PatternParseError;

use crate::pattern::Pattern;

/// A table of named pattern lists, built from a config's `[aliases]`
/// table. `alias:name` references are inlined against this table at
/// config-parse time; there is no runtime `Alias` pattern variant.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, Vec<Pattern>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, patterns: Vec<Pattern>) {
        self.aliases.insert(name.into(), patterns);
    }

    /// Parse one raw pattern string, expanding `alias:name` into the
    /// alias's full pattern list (which may itself already be expanded,
    /// since aliases are resolved from raw strings via
    /// [`AliasTable::insert`] before any rule references them).
    pub fn parse_list(&self, raw: &str) -> Result<Vec<Pattern>, PatternParseError> {
        if let Some(name) = raw.strip_prefix("alias:") {
            return self
                .aliases
                .get(name)
                .cloned()
                .ok_or_else(|| PatternParseError::UnknownAlias(name.to_string()));
        }
        Ok(vec![Pattern::parse(raw)?])
    }
}

#[cfg(test)]
#[path = "alias.test.rs"]
mod tests;
