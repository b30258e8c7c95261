//! The bash rule evaluator (§4.5): resolves a parsed script into a
//! single [`Verdict`] by scoring and matching rules per command, then
//! folding in construct, redirect and heredoc policy with
//! [`combine_strict`].

use cc_allow_config::MergedBashRule;
use cc_allow_config::MergedConfig;
use cc_allow_pattern::Action;
use cc_allow_pattern::MatchContext;
use cc_allow_pattern::Tool;
use cc_allow_shell::Command;
use cc_allow_shell::CommandResolver;
use cc_allow_shell::ExtractionRecord;
use cc_allow_shell::Heredoc;
use cc_allow_shell::Redirect;
use cc_allow_shell::ResolvedCommand;

use crate::compose::combine_strict;
use crate::file_eval::evaluate_file_tool;
use crate::specificity::score;
use crate::verdict::Verdict;

/// Evaluate an entire parsed script: every top-level command, construct
/// use, redirect and heredoc contributes a verdict, and the strictest
/// wins for the whole invocation.
pub fn evaluate_script(
    record: &ExtractionRecord,
    ctx: &MatchContext,
    merged: &MergedConfig,
) -> Verdict {
    if !merged.config_errors.is_empty() {
        return Verdict::new(
            Action::Ask,
            format!(
                "configuration error(s) detected, defaulting to ask: {}",
                merged.config_errors.join("; ")
            ),
            "(config error)",
        );
    }

    if record.commands.is_empty() && record.redirects.is_empty() && record.heredocs.is_empty() {
        return Verdict::new(Action::Ask, "no executable commands in input", "(empty input)");
    }

    let mut verdict = worst_of_default(Action::Allow, "(no commands)");

    for command in &record.commands {
        let command_verdict = evaluate_command(command, ctx, merged);
        verdict = pick_stricter(verdict, command_verdict);
    }

    if record.has_subshell {
        verdict = pick_stricter(
            verdict,
            tracked_verdict(&merged.constructs_subshells, "subshell use"),
        );
    }
    if record.has_function_definition {
        verdict = pick_stricter(
            verdict,
            tracked_verdict(
                &merged.constructs_function_definitions,
                "function definition",
            ),
        );
    }
    if record.has_background {
        verdict = pick_stricter(
            verdict,
            tracked_verdict(&merged.constructs_background, "background job"),
        );
    }

    for heredoc in &record.heredocs {
        verdict = pick_stricter(verdict, evaluate_heredoc(heredoc, ctx, merged));
    }
    for redirect in &record.redirects {
        verdict = pick_stricter(verdict, evaluate_redirect(redirect, record, ctx, merged));
    }

    verdict
}

fn worst_of_default(action: Action, source: &str) -> Verdict {
    Verdict::new(action, String::new(), source)
}

fn pick_stricter(a: Verdict, b: Verdict) -> Verdict {
    if b.action.is_stricter_than(a.action) {
        b
    } else {
        a
    }
}

fn tracked_verdict(tracked: &cc_allow_config::Tracked<Action>, label: &str) -> Verdict {
    let action = tracked.cloned_value().unwrap_or_default();
    Verdict::new(action, format!("{label} requires approval"), tracked.source())
}

fn evaluate_command(command: &Command, ctx: &MatchContext, merged: &MergedConfig) -> Verdict {
    if is_dynamic_name(&command.name) {
        return tracked_verdict(&merged.dynamic_commands, "dynamically computed command");
    }

    let resolver = CommandResolver::new();
    if matches!(
        resolver.resolve(&command.name, &command.cwd),
        ResolvedCommand::Unresolved
    ) {
        return tracked_verdict(&merged.unresolved_commands, "unresolved command");
    }

    // `path:` patterns resolve relative paths against `ctx.cwd`, so a
    // command's own (possibly `cd`-tracked) effective cwd must be used
    // here rather than the process's cwd (§4.3 cd-tracking invariant).
    let ctx = &MatchContext::new(ctx.vars.clone(), command.cwd.clone());

    let args = &command.args;
    let matching: Vec<&MergedBashRule> = merged
        .rules
        .iter()
        .filter(|r| !r.shadowed && rule_matches(r, command, args, ctx))
        .collect();

    if matching.is_empty() {
        return evaluate_commands_list(command, merged, ctx);
    }

    let max_score = matching.iter().map(|r| score(&r.rule)).max().unwrap_or(0);
    let top: Vec<&MergedBashRule> = matching
        .iter()
        .copied()
        .filter(|r| score(&r.rule) == max_score)
        .collect();
    let action = top
        .iter()
        .fold(Action::Allow, |acc, r| combine_strict(acc, r.rule.action));
    // First-inserted (earliest-merged) rule among the tied winners is the
    // source of truth, matching the shadow-detection convention of
    // keeping the earlier rule active (§4.2, §4.5.2).
    let chosen = *top
        .iter()
        .find(|r| r.rule.action == action)
        .expect("matching is non-empty");
    let command_verdict = Verdict::new(
        action,
        if chosen.rule.message.is_empty() {
            merged
                .default_message
                .cloned_value()
                .unwrap_or_default()
        } else {
            chosen.rule.message.clone()
        },
        chosen.source.clone(),
    );

    if action != Action::Allow {
        return command_verdict;
    }

    match evaluate_rule_file_access(command, chosen, ctx, merged) {
        Some(v) => pick_stricter(command_verdict, v),
        None => command_verdict,
    }
}

/// Static command-name → access-type fallback used when a matching rule
/// doesn't name a `file_access_type` of its own (§4.5.1).
fn default_file_access_type(command_name: &str) -> Option<Tool> {
    let base = command_name.rsplit('/').next().unwrap_or(command_name);
    match base {
        "rm" | "chmod" | "chown" | "touch" | "mkdir" | "mv" | "cp" | "truncate" => Some(Tool::Write),
        "cat" | "less" | "more" | "head" | "tail" | "grep" | "rg" => Some(Tool::Read),
        "sed" => Some(Tool::Edit),
        _ => None,
    }
}

fn rule_matches(
    rule: &MergedBashRule,
    command: &Command,
    args: &[String],
    ctx: &MatchContext,
) -> bool {
    let r = &rule.rule;
    if !(r.command.literal_text() == Some("*") || r.command.matches(&command.name, ctx)) {
        return false;
    }
    // The subcommand list is a fixed prefix, not a set of alternatives:
    // "git remote add" only satisfies `subcommands = ["remote", "add"]`.
    if args.len() < r.subcommands.len()
        || !r
            .subcommands
            .iter()
            .zip(args.iter())
            .all(|(want, got)| want == got)
    {
        return false;
    }
    let remaining = &args[r.subcommands.len()..];

    if !pipe_side_matches(&r.pipe.to, &command.pipes_to, ctx) {
        return false;
    }
    if !pipe_side_matches(&r.pipe.from, &command.pipes_from, ctx) {
        return false;
    }
    if let Some(expr) = &r.args.any {
        if !expr.eval(remaining, ctx) {
            return false;
        }
    }
    if let Some(expr) = &r.args.all {
        if !expr.eval(remaining, ctx) {
            return false;
        }
    }
    if let Some(expr) = &r.args.not {
        if !expr.eval(remaining, ctx) {
            return false;
        }
    }
    if let Some(expr) = &r.args.xor {
        if !expr.eval(remaining, ctx) {
            return false;
        }
    }
    for (pos, patterns) in &r.args.position {
        let Some(arg) = remaining.get(*pos) else {
            return false;
        };
        if !patterns.iter().any(|p| p.matches(arg, ctx)) {
            return false;
        }
    }
    true
}

fn pipe_side_matches(
    patterns: &[cc_allow_pattern::Pattern],
    names: &[String],
    ctx: &MatchContext,
) -> bool {
    if patterns.is_empty() {
        return true;
    }
    patterns.iter().any(|p| {
        p.literal_text() == Some("*") && !names.is_empty()
            || names.iter().any(|n| p.matches(n, ctx))
    })
}

fn evaluate_commands_list(command: &Command, merged: &MergedConfig, ctx: &MatchContext) -> Verdict {
    let resolved_path = resolved_path_string(command);
    for (pattern, source) in &merged.commands_deny {
        if command_list_matches(pattern, command, &resolved_path, ctx) {
            return Verdict::new(
                Action::Deny,
                merged
                    .commands_deny_message
                    .cloned_value()
                    .unwrap_or_default(),
                source.clone(),
            );
        }
    }
    for (pattern, source) in &merged.commands_allow {
        if command_list_matches(pattern, command, &resolved_path, ctx) {
            return Verdict::new(
                Action::Allow,
                merged
                    .commands_allow_message
                    .cloned_value()
                    .unwrap_or_default(),
                source.clone(),
            );
        }
    }
    tracked_verdict(&merged.policy_default, "no matching rule")
}

/// A `CommandsList` entry prefixed `path:` matches against the command's
/// resolved path, not its raw token; an unprefixed entry matches either
/// the raw token or the resolved path's basename (§3 CommandsList
/// invariant).
fn command_list_matches(
    pattern: &cc_allow_pattern::Pattern,
    command: &Command,
    resolved_path: &str,
    ctx: &MatchContext,
) -> bool {
    if pattern.is_path_pattern() {
        return pattern.matches(resolved_path, ctx);
    }
    if pattern.matches(&command.name, ctx) {
        return true;
    }
    let basename = std::path::Path::new(resolved_path)
        .file_name()
        .and_then(|n| n.to_str());
    matches!(basename, Some(base) if pattern.matches(base, ctx))
}

/// The path a shell would actually execute for `command`, used for
/// resolved-path pattern matching. Falls back to the raw name when
/// resolution finds nothing concrete (builtins, unresolved `$PATH`
/// lookups).
fn resolved_path_string(command: &Command) -> String {
    CommandResolver::new()
        .resolve(&command.name, &command.cwd)
        .resolved_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| command.name.clone())
}

fn is_dynamic_name(name: &str) -> bool {
    name.starts_with('$') || name.contains("$(") || name.contains('`')
}

fn evaluate_rule_file_access(
    command: &Command,
    rule: &MergedBashRule,
    ctx: &MatchContext,
    merged: &MergedConfig,
) -> Option<Verdict> {
    let respect = rule
        .rule
        .respect_file_rules
        .or(merged.respect_file_rules.cloned_value())
        .unwrap_or(true);
    if !respect {
        return None;
    }
    let tool = rule
        .rule
        .file_access_type
        .or_else(|| default_file_access_type(&command.name))?;
    let file_cfg = match tool {
        Tool::Read => &merged.read,
        Tool::Write => &merged.write,
        Tool::Edit => &merged.edit,
        _ => return None,
    };

    let mut worst: Option<Verdict> = None;
    for arg in &command.args {
        if arg.starts_with('-') || !MatchContext::looks_path_like(arg) {
            continue;
        }
        let resolved = ctx.resolve_absolute(arg);
        let v = evaluate_file_tool(file_cfg, &resolved.display().to_string(), ctx);
        worst = Some(match worst {
            Some(existing) => pick_stricter(existing, v),
            None => v,
        });
    }
    worst
}

fn evaluate_heredoc(heredoc: &Heredoc, ctx: &MatchContext, merged: &MergedConfig) -> Verdict {
    let lines: Vec<String> = heredoc.body.lines().map(str::to_string).collect();
    for rule in &merged.heredocs {
        if rule.rule.content.eval(&lines, ctx) {
            return Verdict::new(rule.rule.action, rule.rule.message.clone(), rule.source.clone());
        }
    }
    if heredoc.is_here_string {
        return Verdict::new(Action::Allow, String::new(), "(no heredoc rule)");
    }
    tracked_verdict(&merged.constructs_heredocs, "heredoc body")
}

fn evaluate_redirect(
    redirect: &Redirect,
    record: &ExtractionRecord,
    ctx: &MatchContext,
    merged: &MergedConfig,
) -> Verdict {
    for rule in merged.redirects.iter().filter(|r| !r.shadowed) {
        if let Some(append) = rule.rule.append {
            if append != matches!(redirect.kind, cc_allow_shell::RedirectKind::Append) {
                continue;
            }
        }
        if rule.rule.paths.iter().any(|p| p.matches(&redirect.target, ctx)) {
            return Verdict::new(
                rule.rule.action,
                rule.rule.message.clone(),
                rule.source.clone(),
            );
        }
    }

    let respect = merged.redirects_respect_file_rules.cloned_value().unwrap_or(false);
    if respect && matches!(redirect.kind, cc_allow_shell::RedirectKind::Out | cc_allow_shell::RedirectKind::Append | cc_allow_shell::RedirectKind::ReadWrite)
    {
        let cwd = record
            .commands
            .get(redirect.command_index)
            .map(|c| c.cwd.clone())
            .unwrap_or_default();
        let target_ctx = MatchContext::new(ctx.vars.clone(), cwd);
        let resolved = target_ctx.resolve_absolute(&redirect.target);
        return evaluate_file_tool(&merged.write, &resolved.display().to_string(), ctx);
    }

    Verdict::new(Action::Allow, String::new(), "(no redirect rule)")
}

#[cfg(test)]
#[path = "bash_eval.test.rs"]
mod tests;
