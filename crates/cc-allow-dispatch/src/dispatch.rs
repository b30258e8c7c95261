//! The tool dispatcher (§4.7): a thin layer that reads a [`HookInput`]
//! and routes it to the right evaluator by `tool_name`.

use std::path::Path;
use std::str::FromStr;

use cc_allow_config::MergedConfig;
use cc_allow_eval::ReputationChecker;
use cc_allow_eval::Verdict;
use cc_allow_error::AstParseError;
use cc_allow_pattern::Action;
use cc_allow_pattern::MatchContext;
use cc_allow_pattern::Tool;

use crate::hook::HookInput;

/// Route one hook invocation to its evaluator and return the resulting
/// [`Verdict`]. `cwd` is the process's own working directory, used as
/// the initial effective cwd for a Bash command's AST walk.
pub fn dispatch(
    input: &HookInput,
    cwd: &Path,
    ctx: &MatchContext,
    merged: &MergedConfig,
    reputation: Option<&dyn ReputationChecker>,
) -> Verdict {
    let tool = match Tool::from_str(&input.tool_name) {
        Ok(tool) => tool,
        Err(_) => {
            return Verdict::new(
                Action::Deny,
                format!("unknown tool {:?}", input.tool_name),
                "(dispatch)",
            );
        }
    };

    match tool {
        Tool::Bash => dispatch_bash(input, cwd, ctx, merged),
        Tool::Read => dispatch_file(&input.tool_input.file_path, &merged.read, ctx),
        Tool::Write => dispatch_file(&input.tool_input.file_path, &merged.write, ctx),
        Tool::Edit => dispatch_file(&input.tool_input.file_path, &merged.edit, ctx),
        Tool::WebFetch => dispatch_webfetch(input, ctx, merged, reputation),
        Tool::Glob | Tool::Grep => dispatch_glob_grep(input, ctx, merged),
    }
}

fn dispatch_bash(input: &HookInput, cwd: &Path, ctx: &MatchContext, merged: &MergedConfig) -> Verdict {
    let Some(command) = &input.tool_input.command else {
        return Verdict::new(Action::Ask, "no command in input", "(dispatch)");
    };

    match cc_allow_shell::extract(command, cwd) {
        Ok(record) => cc_allow_eval::evaluate_script(&record, ctx, merged),
        Err(e) => parse_error_verdict(e),
    }
}

fn parse_error_verdict(e: AstParseError) -> Verdict {
    Verdict::new(Action::Deny, format!("failed to parse command: {e}"), "(parser)")
}

fn dispatch_file(
    path: &Option<String>,
    cfg: &cc_allow_config::MergedFileToolConfig,
    ctx: &MatchContext,
) -> Verdict {
    let Some(path) = path else {
        return Verdict::new(Action::Ask, "no file_path in input", "(dispatch)");
    };
    let resolved = ctx.resolve_absolute(path);
    cc_allow_eval::evaluate_file_tool(cfg, &resolved.display().to_string(), ctx)
}

fn dispatch_webfetch(
    input: &HookInput,
    ctx: &MatchContext,
    merged: &MergedConfig,
    reputation: Option<&dyn ReputationChecker>,
) -> Verdict {
    let Some(url) = &input.tool_input.url else {
        return Verdict::new(Action::Ask, "no url in input", "(dispatch)");
    };
    cc_allow_eval::evaluate_webfetch(
        &merged.webfetch,
        merged.safe_browsing_enabled.cloned_value().unwrap_or(false),
        reputation,
        url,
        ctx,
    )
}

/// Glob/Grep have no `[glob]`/`[grep]` config section of their own
/// (§3 only defines `FileToolConfig` for Read/Write/Edit/WebFetch), so
/// their "own allow/deny" and the "intersect with Read rules" step
/// (§4.7) are one and the same: the Read config, evaluated against the
/// search root named by `path`. `respect_file_rules` remains the escape
/// hatch that skips this check entirely.
fn dispatch_glob_grep(input: &HookInput, ctx: &MatchContext, merged: &MergedConfig) -> Verdict {
    if !merged.respect_file_rules.cloned_value().unwrap_or(true) {
        return Verdict::new(Action::Allow, String::new(), "(respect_file_rules disabled)");
    }

    let search_root = input
        .tool_input
        .path
        .clone()
        .unwrap_or_else(|| ".".to_string());
    let resolved = ctx.resolve_absolute(&search_root);
    cc_allow_eval::evaluate_file_tool(&merged.read, &resolved.display().to_string(), ctx)
}

#[cfg(test)]
#[path = "dispatch.test.rs"]
mod tests;
