use super::*;
use pretty_assertions::assert_eq;

#[test]
fn no_op_checker_always_clean() {
    let checker = NoOpChecker;
    assert_eq!(checker.check("https://example.com").unwrap(), ReputationVerdict::Clean);
}

#[test]
fn safe_browsing_client_builds_with_timeout() {
    let client = SafeBrowsingClient::new("fake-key");
    assert!(client.is_ok());
}
