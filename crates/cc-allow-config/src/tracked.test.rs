use super::*;
use pretty_assertions::assert_eq;

#[test]
fn unset_has_no_value_and_empty_source() {
    let t: Tracked<u8> = Tracked::unset();
    assert!(!t.is_set());
    assert_eq!(t.source(), "");
}

#[test]
fn apply_default_only_touches_unset_slots() {
    let mut unset: Tracked<u8> = Tracked::unset();
    unset.apply_default(5, "(default)");
    assert_eq!(unset.get(), Some(&5));
    assert_eq!(unset.source(), "(default)");

    let mut set = Tracked::set(1, "a.toml");
    set.apply_default(5, "(default)");
    assert_eq!(set.get(), Some(&1));
    assert_eq!(set.source(), "a.toml");
}
