use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parse_list_resolves_alias_to_its_pattern_list() {
    let mut table = AliasTable::new();
    table.insert("vcs", vec![Pattern::parse("git").unwrap(), Pattern::parse("hg").unwrap()]);

    let resolved = table.parse_list("alias:vcs").unwrap();
    assert_eq!(resolved.len(), 2);
}

#[test]
fn parse_list_passes_through_non_alias_patterns() {
    let table = AliasTable::new();
    let resolved = table.parse_list("rm").unwrap();
    assert_eq!(resolved.len(), 1);
}

#[test]
fn parse_list_errors_on_unknown_alias() {
    let table = AliasTable::new();
    let err = table.parse_list("alias:missing").unwrap_err();
    assert!(matches!(err, PatternParseError::UnknownAlias(_)));
}
