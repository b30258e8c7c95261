use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parses_config_flag() {
    let cli = Cli::parse_from(["cc-allow", "--config", "/tmp/cc-allow.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/cc-allow.toml")));
    assert!(!cli.debug);
    assert!(!cli.check);
}

#[test]
fn parses_debug_and_check_flags() {
    let cli = Cli::parse_from(["cc-allow", "--debug", "--check"]);
    assert!(cli.debug);
    assert!(cli.check);
    assert_eq!(cli.config, None);
}

#[test]
fn defaults_to_no_flags() {
    let cli = Cli::parse_from(["cc-allow"]);
    assert_eq!(cli.config, None);
    assert!(!cli.debug);
    assert!(!cli.check);
}
