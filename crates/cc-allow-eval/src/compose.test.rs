use super::*;
use pretty_assertions::assert_eq;

#[test]
fn combine_strict_picks_deny_over_anything() {
    assert_eq!(combine_strict(Action::Allow, Action::Deny), Action::Deny);
    assert_eq!(combine_strict(Action::Deny, Action::Ask), Action::Deny);
}

#[test]
fn combine_strict_is_commutative_on_ties() {
    assert_eq!(combine_strict(Action::Ask, Action::Ask), Action::Ask);
}

#[test]
fn combine_defer_treats_ask_as_neutral() {
    assert_eq!(combine_defer(Action::Ask, Action::Allow), Action::Allow);
    assert_eq!(combine_defer(Action::Deny, Action::Ask), Action::Deny);
}

#[test]
fn combine_defer_falls_back_to_strictness_when_both_decisive() {
    assert_eq!(combine_defer(Action::Allow, Action::Deny), Action::Deny);
}

#[test]
fn combine_defer_of_two_neutrals_is_neutral() {
    assert_eq!(combine_defer(Action::Ask, Action::Ask), Action::Ask);
}
