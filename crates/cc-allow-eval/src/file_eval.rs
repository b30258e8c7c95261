//! Per-tool file-access evaluation (§4.6): Read/Write/Edit and WebFetch
//! all share the same deny-then-allow-then-default shape over a
//! [`MergedFileToolConfig`], so one function serves all four.

use cc_allow_config::MergedFileToolConfig;
use cc_allow_pattern::Action;
use cc_allow_pattern::MatchContext;

use crate::reputation::ReputationChecker;
use crate::reputation::ReputationVerdict;
use crate::verdict::Verdict;

/// Check `path_or_url` (an already-resolved absolute path, or a URL for
/// WebFetch) against `cfg`'s deny list, then its allow list, then fall
/// back to the tracked default action.
pub fn evaluate_file_tool(
    cfg: &MergedFileToolConfig,
    path_or_url: &str,
    ctx: &MatchContext,
) -> Verdict {
    for (pattern, message, source) in &cfg.deny {
        if pattern.matches(path_or_url, ctx) {
            return Verdict::new(cc_allow_pattern::Action::Deny, message.clone(), source.clone());
        }
    }

    for (pattern, source) in &cfg.allow {
        if pattern.matches(path_or_url, ctx) {
            return Verdict::new(cc_allow_pattern::Action::Allow, String::new(), source.clone());
        }
    }

    let action = cfg.default.cloned_value().unwrap_or_default();
    Verdict::new(
        action,
        cfg.default_message.cloned_value().unwrap_or_default(),
        cfg.default.source(),
    )
}

/// WebFetch additionally consults the external reputation service once
/// pattern matching alone hasn't already produced a deny: an affirmative
/// threat classification upgrades the verdict to deny, a transient
/// failure downgrades it to ask (§4.6).
pub fn evaluate_webfetch(
    cfg: &MergedFileToolConfig,
    safe_browsing_enabled: bool,
    checker: Option<&dyn ReputationChecker>,
    url: &str,
    ctx: &MatchContext,
) -> Verdict {
    let verdict = evaluate_file_tool(cfg, url, ctx);
    if verdict.action == Action::Deny || !safe_browsing_enabled {
        return verdict;
    }
    let Some(checker) = checker else {
        return verdict;
    };

    match checker.check(url) {
        Ok(ReputationVerdict::Threat) => Verdict::new(
            Action::Deny,
            "url flagged by the safe browsing service",
            "(safe browsing)",
        ),
        Ok(ReputationVerdict::Clean) => verdict,
        Err(e) => Verdict::new(
            Action::Ask,
            format!("reputation check failed: {e}"),
            "(safe browsing)",
        ),
    }
}

#[cfg(test)]
#[path = "file_eval.test.rs"]
mod tests;
