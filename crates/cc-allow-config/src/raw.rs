//! The purely textual TOML schema (§6 "Per-file schema"), and the
//! compilation step that turns it into the typed [`crate::model::Config`].

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use cc_allow_error::ConfigLoadError;
use cc_allow_error::ConfigValidationError;
use cc_allow_pattern::AliasTable;
use cc_allow_pattern::Action;
use cc_allow_pattern::BoolExpr;
use cc_allow_pattern::Pattern;
use cc_allow_pattern::Tool;
use serde::Deserialize;

use crate::model::ArgsMatch;
use crate::model::BashRule;
use crate::model::BashSection;
use crate::model::Config;
use crate::model::Constructs;
use crate::model::DebugConfig;
use crate::model::FileToolConfig;
use crate::model::HeredocRule;
use crate::model::PipeContext;
use crate::model::RedirectRule;
use crate::model::WebFetchConfig;
use crate::model::parse_one;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub version: Option<u32>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub bash: RawBash,
    #[serde(default)]
    pub read: RawFileTool,
    #[serde(default)]
    pub write: RawFileTool,
    #[serde(default)]
    pub edit: RawFileTool,
    #[serde(default)]
    pub webfetch: RawWebFetch,
    #[serde(default)]
    pub debug: RawDebug,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBash {
    pub default: Option<Action>,
    pub dynamic_commands: Option<Action>,
    pub unresolved_commands: Option<Action>,
    pub default_message: Option<String>,
    pub respect_file_rules: Option<bool>,
    #[serde(default)]
    pub constructs: RawConstructs,
    #[serde(default)]
    pub allow: RawCommandsAllow,
    #[serde(default)]
    pub deny: RawCommandsDeny,
    #[serde(default)]
    pub rules: Vec<RawBashRule>,
    #[serde(default)]
    pub redirects: Vec<RawRedirectRule>,
    pub redirects_respect_file_rules: Option<bool>,
    #[serde(default)]
    pub heredocs: Vec<RawHeredocRule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConstructs {
    pub subshells: Option<Action>,
    pub function_definitions: Option<Action>,
    pub background: Option<Action>,
    pub heredocs: Option<Action>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCommandsAllow {
    #[serde(default)]
    pub commands: Vec<String>,
    pub message: Option<String>,
    pub mode: Option<RawAllowMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCommandsDeny {
    #[serde(default)]
    pub commands: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawAllowMode {
    Merge,
    Replace,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBashRule {
    pub command: String,
    #[serde(default)]
    pub subcommands: Vec<String>,
    pub action: Action,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub args: RawArgsMatch,
    #[serde(default)]
    pub pipe: RawPipeContext,
    pub respect_file_rules: Option<bool>,
    pub file_access_type: Option<RawFileRuleTool>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawFileRuleTool {
    Read,
    Write,
    Edit,
}

impl From<RawFileRuleTool> for Tool {
    fn from(v: RawFileRuleTool) -> Self {
        match v {
            RawFileRuleTool::Read => Tool::Read,
            RawFileRuleTool::Write => Tool::Write,
            RawFileRuleTool::Edit => Tool::Edit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawArgsMatch {
    #[serde(default)]
    pub any: Option<Vec<String>>,
    #[serde(default)]
    pub all: Option<Vec<String>>,
    #[serde(default)]
    pub not: Option<Vec<String>>,
    #[serde(default)]
    pub xor: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub position: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPipeContext {
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub from: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRedirectRule {
    pub action: Action,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub paths: Vec<String>,
    pub append: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHeredocRule {
    pub action: Action,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub content: RawBoolExprLeaf,
}

/// Heredoc `content` is always a flat leaf expression (no nested
/// operators are needed to describe "does the body contain X"), so its
/// TOML shape is simpler than the full recursive `ArgsMatch` grammar.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBoolExprLeaf {
    #[serde(default)]
    pub any: Option<Vec<String>>,
    #[serde(default)]
    pub all: Option<Vec<String>>,
    #[serde(default)]
    pub not: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFileTool {
    pub default: Option<Action>,
    pub default_message: Option<String>,
    #[serde(default)]
    pub allow: RawFileAllow,
    #[serde(default)]
    pub deny: RawFileDeny,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFileAllow {
    #[serde(default)]
    pub paths: Vec<String>,
    pub mode: Option<RawAllowMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFileDeny {
    #[serde(default)]
    pub paths: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWebFetch {
    pub default: Option<Action>,
    pub default_message: Option<String>,
    #[serde(default)]
    pub allow: RawFileAllow,
    #[serde(default)]
    pub deny: RawFileDeny,
    #[serde(default)]
    pub safe_browsing: RawSafeBrowsing,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSafeBrowsing {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDebug {
    #[serde(default)]
    pub enabled: bool,
}

// ---------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------

pub(crate) fn compile(
    path: PathBuf,
    raw: RawConfig,
    aliases: &AliasTable,
) -> Result<Config, ConfigLoadError> {
    let bash = compile_bash(&path, raw.bash, aliases)?;
    let read = compile_file_tool(&path, "read", raw.read, aliases)?;
    let write = compile_file_tool(&path, "write", raw.write, aliases)?;
    let edit = compile_file_tool(&path, "edit", raw.edit, aliases)?;
    let webfetch = compile_webfetch(&path, raw.webfetch, aliases)?;

    Ok(Config {
        path,
        version: raw.version,
        bash,
        read,
        write,
        edit,
        webfetch,
        debug: DebugConfig {
            enabled: raw.debug.enabled,
        },
    })
}

fn compile_bash(
    path: &Path,
    raw: RawBash,
    aliases: &AliasTable,
) -> Result<BashSection, ConfigLoadError> {
    let allow_mode = raw
        .allow
        .mode
        .map(|m| match m {
            RawAllowMode::Merge => crate::model::AllowMode::Merge,
            RawAllowMode::Replace => crate::model::AllowMode::Replace,
        })
        .unwrap_or_default();

    let mut allow_patterns = Vec::new();
    for (i, raw_pat) in raw.allow.commands.iter().enumerate() {
        allow_patterns.extend(parse_one(
            path,
            &format!("bash.allow.commands[{i}]"),
            raw_pat,
            aliases,
        )?);
    }

    let mut deny_patterns = Vec::new();
    for (i, raw_pat) in raw.deny.commands.iter().enumerate() {
        deny_patterns.extend(parse_one(
            path,
            &format!("bash.deny.commands[{i}]"),
            raw_pat,
            aliases,
        )?);
    }

    let mut rules = Vec::with_capacity(raw.rules.len());
    for (i, r) in raw.rules.into_iter().enumerate() {
        rules.push(compile_bash_rule(path, i, r, aliases)?);
    }

    let mut redirects = Vec::with_capacity(raw.redirects.len());
    for (i, r) in raw.redirects.into_iter().enumerate() {
        redirects.push(compile_redirect_rule(path, i, r, aliases)?);
    }

    let mut heredocs = Vec::with_capacity(raw.heredocs.len());
    for (i, r) in raw.heredocs.into_iter().enumerate() {
        heredocs.push(compile_heredoc_rule(path, i, r, aliases)?);
    }

    Ok(BashSection {
        default: raw.default,
        dynamic_commands: raw.dynamic_commands,
        unresolved_commands: raw.unresolved_commands,
        default_message: raw.default_message,
        respect_file_rules: raw.respect_file_rules,
        constructs: Constructs {
            subshells: raw.constructs.subshells,
            function_definitions: raw.constructs.function_definitions,
            background: raw.constructs.background,
            heredocs: raw.constructs.heredocs,
        },
        commands: crate::model::CommandsList {
            allow: allow_patterns,
            allow_message: raw.allow.message,
            allow_mode,
            deny: deny_patterns,
            deny_message: raw.deny.message,
        },
        rules,
        redirects,
        redirects_respect_file_rules: raw.redirects_respect_file_rules,
        heredocs,
    })
}

fn compile_bash_rule(
    path: &Path,
    index: usize,
    raw: RawBashRule,
    aliases: &AliasTable,
) -> Result<BashRule, ConfigLoadError> {
    let field = format!("bash.rules[{index}]");
    let command_patterns = parse_one(path, &format!("{field}.command"), &raw.command, aliases)?;
    let command = command_patterns.into_iter().next().ok_or_else(|| {
        ConfigValidationError::new(
            path,
            format!("{field}.command"),
            &raw.command,
            "command pattern resolved to no patterns (empty alias?)",
        )
    })?;

    let args = compile_args_match(path, &format!("{field}.args"), raw.args, aliases)?;
    let pipe = compile_pipe(path, &format!("{field}.pipe"), raw.pipe, aliases)?;

    Ok(BashRule {
        command,
        subcommands: raw.subcommands,
        action: raw.action,
        message: raw.message,
        args,
        pipe,
        respect_file_rules: raw.respect_file_rules,
        file_access_type: raw.file_access_type.map(Tool::from),
    })
}

fn compile_args_match(
    path: &Path,
    field: &str,
    raw: RawArgsMatch,
    aliases: &AliasTable,
) -> Result<ArgsMatch, ConfigLoadError> {
    let any = match raw.any {
        Some(list) => Some(BoolExpr::Patterns(compile_pattern_list(
            path,
            &format!("{field}.any"),
            &list,
            aliases,
        )?)),
        None => None,
    };
    let all = match raw.all {
        Some(list) => {
            let mut children = Vec::with_capacity(list.len());
            for (i, raw_pat) in list.iter().enumerate() {
                let patterns = parse_one(path, &format!("{field}.all[{i}]"), raw_pat, aliases)?;
                children.push(BoolExpr::Patterns(patterns));
            }
            Some(BoolExpr::All(children))
        }
        None => None,
    };
    let not = match raw.not {
        Some(list) => Some(BoolExpr::Not(Box::new(BoolExpr::Patterns(
            compile_pattern_list(path, &format!("{field}.not"), &list, aliases)?,
        )))),
        None => None,
    };
    let xor = match raw.xor {
        Some(children_raw) => {
            let mut children = Vec::with_capacity(children_raw.len());
            for (i, list) in children_raw.iter().enumerate() {
                let patterns =
                    compile_pattern_list(path, &format!("{field}.xor[{i}]"), list, aliases)?;
                children.push(BoolExpr::Patterns(patterns));
            }
            Some(BoolExpr::Xor(children))
        }
        None => None,
    };

    let mut position = BTreeMap::new();
    for (key, list) in raw.position {
        let idx: usize = key.parse().map_err(|_| {
            ConfigValidationError::new(
                path,
                format!("{field}.position"),
                &key,
                "position key must be a non-negative integer",
            )
        })?;
        position.insert(
            idx,
            compile_pattern_list(path, &format!("{field}.position.{key}"), &list, aliases)?,
        );
    }

    Ok(ArgsMatch {
        any,
        all,
        not,
        xor,
        position,
    })
}

fn compile_pipe(
    path: &Path,
    field: &str,
    raw: RawPipeContext,
    aliases: &AliasTable,
) -> Result<PipeContext, ConfigLoadError> {
    Ok(PipeContext {
        to: compile_pattern_list(path, &format!("{field}.to"), &raw.to, aliases)?,
        from: compile_pattern_list(path, &format!("{field}.from"), &raw.from, aliases)?,
    })
}

fn compile_redirect_rule(
    path: &Path,
    index: usize,
    raw: RawRedirectRule,
    aliases: &AliasTable,
) -> Result<RedirectRule, ConfigLoadError> {
    let field = format!("bash.redirects[{index}]");
    Ok(RedirectRule {
        action: raw.action,
        message: raw.message,
        paths: compile_pattern_list(path, &format!("{field}.paths"), &raw.paths, aliases)?,
        append: raw.append,
    })
}

fn compile_heredoc_rule(
    path: &Path,
    index: usize,
    raw: RawHeredocRule,
    aliases: &AliasTable,
) -> Result<HeredocRule, ConfigLoadError> {
    let field = format!("bash.heredocs[{index}].content");
    let content = compile_leaf(path, &field, raw.content, aliases)?;
    Ok(HeredocRule {
        action: raw.action,
        message: raw.message,
        content,
    })
}

fn compile_leaf(
    path: &Path,
    field: &str,
    raw: RawBoolExprLeaf,
    aliases: &AliasTable,
) -> Result<BoolExpr, ConfigLoadError> {
    let mut children = Vec::new();
    if let Some(list) = raw.any {
        children.push(BoolExpr::Patterns(compile_pattern_list(
            path,
            &format!("{field}.any"),
            &list,
            aliases,
        )?));
    }
    if let Some(list) = raw.all {
        let mut all_children = Vec::with_capacity(list.len());
        for (i, raw_pat) in list.iter().enumerate() {
            let patterns = parse_one(path, &format!("{field}.all[{i}]"), raw_pat, aliases)?;
            all_children.push(BoolExpr::Patterns(patterns));
        }
        children.push(BoolExpr::All(all_children));
    }
    if let Some(list) = raw.not {
        children.push(BoolExpr::Not(Box::new(BoolExpr::Patterns(
            compile_pattern_list(path, &format!("{field}.not"), &list, aliases)?,
        ))));
    }
    match children.len() {
        0 => Ok(BoolExpr::Patterns(Vec::new())),
        1 => Ok(children.into_iter().next().expect("len checked")),
        _ => Ok(BoolExpr::All(children)),
    }
}

fn compile_pattern_list(
    path: &Path,
    field: &str,
    raw: &[String],
    aliases: &AliasTable,
) -> Result<Vec<Pattern>, ConfigLoadError> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, raw_pat) in raw.iter().enumerate() {
        out.extend(parse_one(path, &format!("{field}[{i}]"), raw_pat, aliases)?);
    }
    Ok(out)
}

fn compile_file_tool(
    path: &Path,
    tool_name: &str,
    raw: RawFileTool,
    aliases: &AliasTable,
) -> Result<FileToolConfig, ConfigLoadError> {
    let allow_mode = raw
        .allow
        .mode
        .map(|m| match m {
            RawAllowMode::Merge => crate::model::AllowMode::Merge,
            RawAllowMode::Replace => crate::model::AllowMode::Replace,
        })
        .unwrap_or_default();

    let allow = compile_pattern_list(
        path,
        &format!("{tool_name}.allow.paths"),
        &raw.allow.paths,
        aliases,
    )?;

    let mut deny = Vec::with_capacity(raw.deny.paths.len());
    for (i, raw_pat) in raw.deny.paths.iter().enumerate() {
        let patterns = parse_one(
            path,
            &format!("{tool_name}.deny.paths[{i}]"),
            raw_pat,
            aliases,
        )?;
        for p in patterns {
            deny.push((p, raw.deny.message.clone()));
        }
    }

    Ok(FileToolConfig {
        default: raw.default,
        default_message: raw.default_message,
        deny,
        allow,
        allow_mode,
    })
}

fn compile_webfetch(
    path: &Path,
    raw: RawWebFetch,
    aliases: &AliasTable,
) -> Result<WebFetchConfig, ConfigLoadError> {
    let file = compile_file_tool(
        path,
        "webfetch",
        RawFileTool {
            default: raw.default,
            default_message: raw.default_message,
            allow: raw.allow,
            deny: raw.deny,
        },
        aliases,
    )?;
    Ok(WebFetchConfig {
        file,
        safe_browsing_enabled: raw.safe_browsing.enabled,
    })
}

#[cfg(test)]
#[path = "raw.test.rs"]
mod tests;
