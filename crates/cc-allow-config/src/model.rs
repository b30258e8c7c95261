//! The compiled (post-parse) data model of §3: a single [`Config`] and the
//! [`MergedConfig`] produced by folding many of them together.

use std::collections::BTreeMap;
use std::path::PathBuf;

use cc_allow_error::ConfigLoadError;
use cc_allow_error::ConfigValidationError;
use cc_allow_pattern::AliasTable;
use cc_allow_pattern::Action;
use cc_allow_pattern::BoolExpr;
use cc_allow_pattern::Pattern;
use cc_allow_pattern::Tool;

use crate::raw::RawConfig;
use crate::tracked::Tracked;

/// Whether a later config's allow list adds to or replaces the
/// accumulated allow list (§3 `FileToolConfig`/`CommandsList`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowMode {
    #[default]
    Merge,
    Replace,
}

/// Optional boolean expressions plus a fixed-position map over the
/// argument vector remaining after the subcommand prefix is stripped.
#[derive(Debug, Clone, Default)]
pub struct ArgsMatch {
    pub any: Option<BoolExpr>,
    pub all: Option<BoolExpr>,
    pub not: Option<BoolExpr>,
    pub xor: Option<BoolExpr>,
    pub position: BTreeMap<usize, Vec<Pattern>>,
}

impl ArgsMatch {
    pub fn is_empty(&self) -> bool {
        self.any.is_none()
            && self.all.is_none()
            && self.not.is_none()
            && self.xor.is_none()
            && self.position.is_empty()
    }
}

/// `pipe.to` / `pipe.from` name lists. The literal pattern text `"*"`
/// means "matches any upstream/downstream command" and is special-cased
/// at evaluation time rather than via normal pattern semantics.
#[derive(Debug, Clone, Default)]
pub struct PipeContext {
    pub to: Vec<Pattern>,
    pub from: Vec<Pattern>,
}

impl PipeContext {
    pub fn is_empty(&self) -> bool {
        self.to.is_empty() && self.from.is_empty()
    }
}

/// A single bash rule (§3 `BashRule`).
#[derive(Debug, Clone)]
pub struct BashRule {
    pub command: Pattern,
    pub subcommands: Vec<String>,
    pub action: Action,
    pub message: String,
    pub args: ArgsMatch,
    pub pipe: PipeContext,
    pub respect_file_rules: Option<bool>,
    pub file_access_type: Option<Tool>,
}

/// A redirect rule (§3 `RedirectRule`).
#[derive(Debug, Clone)]
pub struct RedirectRule {
    pub action: Action,
    pub message: String,
    pub paths: Vec<Pattern>,
    pub append: Option<bool>,
}

/// A heredoc rule (§3 `HeredocRule`).
#[derive(Debug, Clone)]
pub struct HeredocRule {
    pub action: Action,
    pub message: String,
    pub content: BoolExpr,
}

/// The four construct policies (§3 `Constructs`).
#[derive(Debug, Clone, Default)]
pub struct Constructs {
    pub subshells: Option<Action>,
    pub function_definitions: Option<Action>,
    pub background: Option<Action>,
    pub heredocs: Option<Action>,
}

/// A command-name pattern plus its (optional, merge-sensitive) message.
#[derive(Debug, Clone)]
pub struct CommandsList {
    pub allow: Vec<Pattern>,
    pub allow_message: Option<String>,
    pub allow_mode: AllowMode,
    pub deny: Vec<Pattern>,
    pub deny_message: Option<String>,
}

impl Default for CommandsList {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            allow_message: None,
            allow_mode: AllowMode::Merge,
            deny: Vec::new(),
            deny_message: None,
        }
    }
}

/// Per-tool deny/allow config for Read/Write/Edit (§3 `FileToolConfig`).
#[derive(Debug, Clone, Default)]
pub struct FileToolConfig {
    pub default: Option<Action>,
    pub default_message: Option<String>,
    pub deny: Vec<(Pattern, Option<String>)>,
    pub allow: Vec<Pattern>,
    pub allow_mode: AllowMode,
}

/// WebFetch's `FileToolConfig` plus the reputation-service switch.
#[derive(Debug, Clone, Default)]
pub struct WebFetchConfig {
    pub file: FileToolConfig,
    pub safe_browsing_enabled: bool,
}

/// The `[debug]` section; out of scope beyond this flag per spec.
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub enabled: bool,
}

/// The bash section of one config file.
#[derive(Debug, Clone, Default)]
pub struct BashSection {
    pub default: Option<Action>,
    pub dynamic_commands: Option<Action>,
    pub unresolved_commands: Option<Action>,
    pub default_message: Option<String>,
    pub respect_file_rules: Option<bool>,
    pub constructs: Constructs,
    pub commands: CommandsList,
    pub rules: Vec<BashRule>,
    pub redirects: Vec<RedirectRule>,
    pub redirects_respect_file_rules: Option<bool>,
    pub heredocs: Vec<HeredocRule>,
}

/// One raw, compiled config file (§3 "Config (raw)").
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub version: Option<u32>,
    pub bash: BashSection,
    pub read: FileToolConfig,
    pub write: FileToolConfig,
    pub edit: FileToolConfig,
    pub webfetch: WebFetchConfig,
    pub debug: DebugConfig,
}

impl Config {
    /// Compile a [`RawConfig`] (purely textual, just-deserialized TOML)
    /// into a typed `Config`, parsing every pattern string and inlining
    /// alias references. Any failure is reported as a
    /// [`ConfigValidationError`] naming the dotted field path.
    pub fn compile(path: PathBuf, raw: RawConfig) -> Result<Config, ConfigLoadError> {
        if raw.version.is_some_and(|v| v < 2) {
            return Err(ConfigLoadError::Validation(ConfigValidationError::new(
                path.clone(),
                "version",
                raw.version.map(|v| v.to_string()).unwrap_or_default(),
                "legacy v1 config schema is no longer supported; migrate to v2",
            )));
        }

        let mut aliases = AliasTable::new();
        for (name, patterns) in &raw.aliases {
            let mut compiled = Vec::with_capacity(patterns.len());
            for p in patterns {
                compiled.extend(parse_one(&path, &format!("aliases.{name}"), p, &aliases)?);
            }
            aliases.insert(name.clone(), compiled);
        }

        crate::raw::compile(path, raw, &aliases)
    }
}

/// Parse one raw pattern string, resolving `alias:` references against
/// `aliases`, tagging any failure with `field` for the validation error.
pub(crate) fn parse_one(
    path: &std::path::Path,
    field: &str,
    raw: &str,
    aliases: &AliasTable,
) -> Result<Vec<Pattern>, ConfigValidationError> {
    aliases
        .parse_list(raw)
        .map_err(|e| ConfigValidationError::new(path, field, raw, e.to_string()))
}

// ---------------------------------------------------------------------
// MergedConfig
// ---------------------------------------------------------------------

/// A merged bash rule, carrying shadow-detection bookkeeping (§4.2).
#[derive(Debug, Clone)]
pub struct MergedBashRule {
    pub rule: BashRule,
    pub source: String,
    pub shadowed: bool,
    pub shadowing: Option<String>,
}

/// A merged redirect rule; follows the same shadow discipline as bash
/// rules.
#[derive(Debug, Clone)]
pub struct MergedRedirectRule {
    pub rule: RedirectRule,
    pub source: String,
    pub shadowed: bool,
    pub shadowing: Option<String>,
}

/// A merged heredoc rule. Heredoc rules never shadow one another (§4.2).
#[derive(Debug, Clone)]
pub struct MergedHeredocRule {
    pub rule: HeredocRule,
    pub source: String,
}

/// The merged per-tool file config (§3 `MergedConfig`).
#[derive(Debug, Clone, Default)]
pub struct MergedFileToolConfig {
    pub default: Tracked<Action>,
    pub default_message: Tracked<String>,
    pub deny: Vec<(Pattern, String, String)>, // (pattern, message, source)
    pub allow: Vec<(Pattern, String)>,        // (pattern, source)
}

/// The fixed point of merging a sequence of [`Config`]s (§3
/// `MergedConfig`, §4.2).
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    pub policy_default: Tracked<Action>,
    pub dynamic_commands: Tracked<Action>,
    pub unresolved_commands: Tracked<Action>,
    pub default_message: Tracked<String>,
    pub respect_file_rules: Tracked<bool>,

    pub constructs_subshells: Tracked<Action>,
    pub constructs_function_definitions: Tracked<Action>,
    pub constructs_background: Tracked<Action>,
    pub constructs_heredocs: Tracked<Action>,

    pub commands_allow: Vec<(Pattern, String)>,
    pub commands_allow_message: Tracked<String>,
    pub commands_deny: Vec<(Pattern, String)>,
    pub commands_deny_message: Tracked<String>,

    pub rules: Vec<MergedBashRule>,
    pub redirects: Vec<MergedRedirectRule>,
    pub redirects_respect_file_rules: Tracked<bool>,
    pub heredocs: Vec<MergedHeredocRule>,

    pub read: MergedFileToolConfig,
    pub write: MergedFileToolConfig,
    pub edit: MergedFileToolConfig,
    pub webfetch: MergedFileToolConfig,
    pub safe_browsing_enabled: Tracked<bool>,

    pub debug_enabled: Tracked<bool>,

    /// Sources that failed to validate. A non-empty list short-circuits
    /// evaluation to `ask` per §4.5 "Pre-flight".
    pub config_errors: Vec<String>,
}
