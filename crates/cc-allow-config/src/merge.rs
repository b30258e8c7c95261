//! Folding many [`Config`]s into one [`MergedConfig`] (§4.2).
//!
//! Configs are merged in increasing specificity order (the caller is
//! responsible for ordering — typically plugin, then user, then project,
//! then project-local). Scalars use stricter-wins; lists accumulate with
//! a source tag; `AllowMode::Replace` clears what a more general config
//! already contributed to an allow list (and, for bash, any previously
//! accumulated allow-action rule) before this config's own entries are
//! appended. Deny lists are never cleared by `Replace`.

use cc_allow_pattern::Action;
use cc_allow_pattern::Pattern;

use crate::model::AllowMode;
use crate::model::BashRule;
use crate::model::Config;
use crate::model::FileToolConfig;
use crate::model::MergedBashRule;
use crate::model::MergedConfig;
use crate::model::MergedFileToolConfig;
use crate::model::MergedHeredocRule;
use crate::model::MergedRedirectRule;
use crate::model::RedirectRule;
use crate::tracked::Tracked;

pub fn merge(configs: &[Config]) -> MergedConfig {
    let mut merged = MergedConfig::default();

    for config in configs {
        let source = display_path(config);
        merge_one(&mut merged, config, &source);
    }

    detect_rule_shadows(&mut merged.rules);
    detect_redirect_shadows(&mut merged.redirects);

    merged
}

fn display_path(config: &Config) -> String {
    config.path.display().to_string()
}

fn merge_one(merged: &mut MergedConfig, config: &Config, source: &str) {
    apply_stricter(&mut merged.policy_default, config.bash.default, source);
    apply_stricter(
        &mut merged.dynamic_commands,
        config.bash.dynamic_commands,
        source,
    );
    apply_stricter(
        &mut merged.unresolved_commands,
        config.bash.unresolved_commands,
        source,
    );
    apply_last_set(
        &mut merged.default_message,
        config.bash.default_message.clone(),
        source,
    );
    apply_stricter_bool(
        &mut merged.respect_file_rules,
        config.bash.respect_file_rules,
        source,
    );

    apply_stricter(
        &mut merged.constructs_subshells,
        config.bash.constructs.subshells,
        source,
    );
    apply_stricter(
        &mut merged.constructs_function_definitions,
        config.bash.constructs.function_definitions,
        source,
    );
    apply_stricter(
        &mut merged.constructs_background,
        config.bash.constructs.background,
        source,
    );
    apply_stricter(
        &mut merged.constructs_heredocs,
        config.bash.constructs.heredocs,
        source,
    );

    if config.bash.commands.allow_mode == AllowMode::Replace {
        merged.commands_allow.clear();
        merged.rules.retain(|r| r.rule.action != Action::Allow);
    }
    for pattern in &config.bash.commands.allow {
        merged
            .commands_allow
            .push((pattern.clone(), source.to_string()));
    }
    for pattern in &config.bash.commands.deny {
        merged
            .commands_deny
            .push((pattern.clone(), source.to_string()));
    }
    apply_last_set(
        &mut merged.commands_allow_message,
        config.bash.commands.allow_message.clone(),
        source,
    );
    apply_last_set(
        &mut merged.commands_deny_message,
        config.bash.commands.deny_message.clone(),
        source,
    );

    for rule in &config.bash.rules {
        merged.rules.push(MergedBashRule {
            rule: rule.clone(),
            source: source.to_string(),
            shadowed: false,
            shadowing: None,
        });
    }

    for redirect in &config.bash.redirects {
        merged.redirects.push(MergedRedirectRule {
            rule: redirect.clone(),
            source: source.to_string(),
            shadowed: false,
            shadowing: None,
        });
    }
    apply_stricter_bool(
        &mut merged.redirects_respect_file_rules,
        config.bash.redirects_respect_file_rules,
        source,
    );

    for heredoc in &config.bash.heredocs {
        merged.heredocs.push(MergedHeredocRule {
            rule: heredoc.clone(),
            source: source.to_string(),
        });
    }

    merge_file_tool(&mut merged.read, &config.read, source);
    merge_file_tool(&mut merged.write, &config.write, source);
    merge_file_tool(&mut merged.edit, &config.edit, source);
    merge_file_tool(&mut merged.webfetch, &config.webfetch.file, source);
    apply_stricter_bool(
        &mut merged.safe_browsing_enabled,
        Some(config.webfetch.safe_browsing_enabled).filter(|&v| v),
        source,
    );

    apply_stricter_bool(
        &mut merged.debug_enabled,
        Some(config.debug.enabled).filter(|&v| v),
        source,
    );
}

fn merge_file_tool(merged: &mut MergedFileToolConfig, config: &FileToolConfig, source: &str) {
    apply_stricter(&mut merged.default, config.default, source);
    apply_last_set(
        &mut merged.default_message,
        config.default_message.clone(),
        source,
    );

    if config.allow_mode == AllowMode::Replace {
        merged.allow.clear();
    }
    for pattern in &config.allow {
        merged.allow.push((pattern.clone(), source.to_string()));
    }
    for (pattern, message) in &config.deny {
        merged.deny.push((
            pattern.clone(),
            message.clone().unwrap_or_default(),
            source.to_string(),
        ));
    }
}

/// Deny-list strictness tie-breaking for `Option<Action>` scalars:
/// Deny > Ask > Allow, first-seen wins ties, unset never overwrites set.
fn apply_stricter(tracked: &mut Tracked<Action>, candidate: Option<Action>, source: &str) {
    let Some(candidate) = candidate else {
        return;
    };
    match tracked.get() {
        None => tracked.overwrite(candidate, source),
        Some(&existing) => {
            if candidate.is_stricter_than(existing) {
                tracked.overwrite(candidate, source);
            }
        }
    }
}

/// `true` is treated as the stricter value for boolean policy switches
/// (`respect_file_rules`, `safe_browsing_enabled`, ...): any config that
/// turns a safety switch on keeps it on regardless of merge order.
fn apply_stricter_bool(tracked: &mut Tracked<bool>, candidate: Option<bool>, source: &str) {
    let Some(candidate) = candidate else {
        return;
    };
    match tracked.get() {
        None => tracked.overwrite(candidate, source),
        Some(&existing) => {
            if candidate && !existing {
                tracked.overwrite(candidate, source);
            }
        }
    }
}

/// Messages have no strictness ordering; the most specific config that
/// sets one wins.
fn apply_last_set(tracked: &mut Tracked<String>, candidate: Option<String>, source: &str) {
    if let Some(candidate) = candidate {
        tracked.overwrite(candidate, source);
    }
}

/// For each rule, find the nearest earlier non-shadowed rule it exactly
/// matches (if any) and resolve the pair by strictness (§4.2): the
/// stricter of the two stays active, the other is marked `shadowed`. Only
/// the first matching existing rule is considered for a given new rule.
fn detect_rule_shadows(rules: &mut [MergedBashRule]) {
    for j in 0..rules.len() {
        let Some(i) = (0..j)
            .rev()
            .find(|&i| !rules[i].shadowed && bash_rule_exact_match(&rules[i].rule, &rules[j].rule))
        else {
            continue;
        };
        if rules[j].rule.action.is_stricter_than(rules[i].rule.action) {
            let new_source = rules[j].source.clone();
            rules[i].shadowed = true;
            rules[i].shadowing = Some(new_source);
        } else {
            let existing_source = rules[i].source.clone();
            rules[j].shadowed = true;
            rules[j].shadowing = Some(existing_source);
        }
    }
}

fn detect_redirect_shadows(redirects: &mut [MergedRedirectRule]) {
    for j in 0..redirects.len() {
        let Some(i) = (0..j).rev().find(|&i| {
            !redirects[i].shadowed && redirect_exact_match(&redirects[i].rule, &redirects[j].rule)
        }) else {
            continue;
        };
        if redirects[j].rule.action.is_stricter_than(redirects[i].rule.action) {
            let new_source = redirects[j].source.clone();
            redirects[i].shadowed = true;
            redirects[i].shadowing = Some(new_source);
        } else {
            let existing_source = redirects[i].source.clone();
            redirects[j].shadowed = true;
            redirects[j].shadowing = Some(existing_source);
        }
    }
}

/// Two bash rules "exact match" (§4.2 shadow detection) when every field
/// that participates in matching is structurally identical; `action` and
/// `message` are deliberately excluded, since a rule that matches the
/// same commands with a different verdict is exactly the shadowing case
/// this detects.
fn bash_rule_exact_match(a: &BashRule, b: &BashRule) -> bool {
    pattern_fingerprint(&a.command) == pattern_fingerprint(&b.command)
        && a.subcommands == b.subcommands
        && a.respect_file_rules == b.respect_file_rules
        && a.file_access_type == b.file_access_type
        && patterns_fingerprint(&a.pipe.to) == patterns_fingerprint(&b.pipe.to)
        && patterns_fingerprint(&a.pipe.from) == patterns_fingerprint(&b.pipe.from)
        && args_match_exact(a, b)
}

fn args_match_exact(a: &BashRule, b: &BashRule) -> bool {
    bool_expr_opt_eq(a.args.any.as_ref(), b.args.any.as_ref())
        && bool_expr_opt_eq(a.args.all.as_ref(), b.args.all.as_ref())
        && bool_expr_opt_eq(a.args.not.as_ref(), b.args.not.as_ref())
        && bool_expr_opt_eq(a.args.xor.as_ref(), b.args.xor.as_ref())
        && a.args.position.len() == b.args.position.len()
        && a.args
            .position
            .iter()
            .zip(&b.args.position)
            .all(|((pa, la), (pb, lb))| pa == pb && patterns_fingerprint(la) == patterns_fingerprint(lb))
}

fn bool_expr_opt_eq(a: Option<&cc_allow_pattern::BoolExpr>, b: Option<&cc_allow_pattern::BoolExpr>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.structurally_eq(b),
        _ => false,
    }
}

fn redirect_exact_match(a: &RedirectRule, b: &RedirectRule) -> bool {
    a.append == b.append && patterns_fingerprint(&a.paths) == patterns_fingerprint(&b.paths)
}

fn pattern_fingerprint(p: &Pattern) -> String {
    format!("{p:?}")
}

fn patterns_fingerprint(patterns: &[Pattern]) -> Vec<String> {
    patterns.iter().map(pattern_fingerprint).collect()
}

#[cfg(test)]
#[path = "merge.test.rs"]
mod tests;
