use super::*;
use pretty_assertions::assert_eq;

#[test]
fn priority_order_is_deny_ask_allow() {
    assert!(Action::Deny.priority() > Action::Ask.priority());
    assert!(Action::Ask.priority() > Action::Allow.priority());
}

#[test]
fn is_stricter_than_is_strict() {
    assert!(Action::Deny.is_stricter_than(Action::Ask));
    assert!(!Action::Ask.is_stricter_than(Action::Ask));
    assert!(!Action::Allow.is_stricter_than(Action::Deny));
}

#[test]
fn max_strictness_picks_stricter_and_ties_favor_self() {
    assert_eq!(Action::Allow.max_strictness(Action::Deny), Action::Deny);
    assert_eq!(Action::Deny.max_strictness(Action::Allow), Action::Deny);
    assert_eq!(Action::Ask.max_strictness(Action::Ask), Action::Ask);
}
