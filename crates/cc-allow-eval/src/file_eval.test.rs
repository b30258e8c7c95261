use super::*;
use pretty_assertions::assert_eq;
use cc_allow_pattern::Action;
use cc_allow_pattern::Pattern;

fn ctx() -> MatchContext {
    MatchContext::new(cc_allow_pattern::PathVars::default(), "/home/user/project")
}

#[test]
fn deny_list_wins_over_allow_list() {
    let mut cfg = MergedFileToolConfig::default();
    cfg.deny.push((
        Pattern::parse("path:/etc/**").unwrap(),
        "no touching /etc".to_string(),
        "test.toml".to_string(),
    ));
    cfg.allow.push((Pattern::parse("path:/etc/**").unwrap(), "test.toml".to_string()));

    let v = evaluate_file_tool(&cfg, "/etc/passwd", &ctx());
    assert_eq!(v.action, Action::Deny);
    assert_eq!(v.message, "no touching /etc");
}

#[test]
fn allow_list_matches_when_not_denied() {
    let mut cfg = MergedFileToolConfig::default();
    cfg.allow.push((Pattern::parse("path:/home/user/project/**").unwrap(), "test.toml".to_string()));

    let v = evaluate_file_tool(&cfg, "/home/user/project/src/main.rs", &ctx());
    assert_eq!(v.action, Action::Allow);
}

#[test]
fn falls_back_to_tracked_default_when_unmatched() {
    let cfg = MergedFileToolConfig::default();
    let v = evaluate_file_tool(&cfg, "/some/random/path", &ctx());
    assert_eq!(v.action, Action::default());
}

struct StubChecker(ReputationVerdict);

impl ReputationChecker for StubChecker {
    fn check(&self, _url: &str) -> Result<ReputationVerdict, cc_allow_error::ReputationError> {
        Ok(self.0)
    }
}

struct FailingChecker;

impl ReputationChecker for FailingChecker {
    fn check(&self, _url: &str) -> Result<ReputationVerdict, cc_allow_error::ReputationError> {
        Err(cc_allow_error::ReputationError::Timeout)
    }
}

#[test]
fn webfetch_skips_reputation_check_when_disabled() {
    let cfg = MergedFileToolConfig::default();
    let checker = StubChecker(ReputationVerdict::Threat);
    let v = evaluate_webfetch(&cfg, false, Some(&checker), "https://example.com", &ctx());
    assert_eq!(v.action, Action::default());
}

#[test]
fn webfetch_upgrades_to_deny_on_threat() {
    let cfg = MergedFileToolConfig::default();
    let checker = StubChecker(ReputationVerdict::Threat);
    let v = evaluate_webfetch(&cfg, true, Some(&checker), "https://example.com", &ctx());
    assert_eq!(v.action, Action::Deny);
}

#[test]
fn webfetch_downgrades_to_ask_on_reputation_failure() {
    let cfg = MergedFileToolConfig::default();
    let v = evaluate_webfetch(&cfg, true, Some(&FailingChecker), "https://example.com", &ctx());
    assert_eq!(v.action, Action::Ask);
}

#[test]
fn webfetch_skips_reputation_check_when_already_denied() {
    let mut cfg = MergedFileToolConfig::default();
    cfg.deny.push((
        Pattern::parse("https://evil.example/**").unwrap(),
        "blocked".to_string(),
        "test.toml".to_string(),
    ));
    let checker = StubChecker(ReputationVerdict::Clean);
    let v = evaluate_webfetch(&cfg, true, Some(&checker), "https://evil.example/x", &ctx());
    assert_eq!(v.action, Action::Deny);
    assert_eq!(v.message, "blocked");
}
