//! Tests for publisher CLI parsing.

use super::*;
use rstest::rstest;

const REQUIRED: [&str; 9] = [
    "registry-publisher",
    "--store-dir",
    "/srv/site",
    "--prefix",
    "binaries",
    "--url",
    "https://registry.example.com",
    "--namespace",
    "acme-corp",
];

fn parse_with(extra: &[&str]) -> Cli {
    let args: Vec<&str> = REQUIRED.iter().chain(extra).copied().collect();
    Cli::parse_from(args)
}

#[test]
fn cli_parses_required_arguments() {
    let cli = parse_with(&["--fingerprint", "ABCD"]);
    assert_eq!(cli.store_dir, Utf8PathBuf::from("/srv/site"));
    assert_eq!(cli.prefix, "binaries");
    assert_eq!(cli.url, "https://registry.example.com");
    assert_eq!(cli.namespace, "acme-corp");
    assert_eq!(cli.fingerprint.as_deref(), Some("ABCD"));
    assert_eq!(cli.protocols, "5.0");
    assert!(!cli.dry_run);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn cli_parses_protocol_list_and_dry_run() {
    let cli = parse_with(&["--protocols", "5.0,6.0", "--dry-run"]);
    assert_eq!(cli.protocols, "5.0,6.0");
    assert!(cli.dry_run);
}

#[rstest]
#[case::missing_url(&["registry-publisher", "--store-dir", "s", "--prefix", "b", "--namespace", "n"])]
#[case::missing_store(&["registry-publisher", "--prefix", "b", "--url", "u", "--namespace", "n"])]
fn cli_rejects_missing_required_arguments(#[case] args: &[&str]) {
    Cli::try_parse_from(args).expect_err("expected clap to reject missing arguments");
}

#[test]
fn cli_rejects_verbose_with_quiet() {
    let args: Vec<&str> = REQUIRED.iter().chain(&["-v", "-q"]).copied().collect();
    Cli::try_parse_from(args).expect_err("expected clap to reject conflicting flags");
}

#[rstest]
#[case::default(&[], LevelFilter::Info)]
#[case::verbose(&["-v"], LevelFilter::Debug)]
#[case::very_verbose(&["-vv"], LevelFilter::Trace)]
#[case::quiet(&["-q"], LevelFilter::Error)]
fn log_level_follows_flags(#[case] extra: &[&str], #[case] expected: LevelFilter) {
    assert_eq!(parse_with(extra).log_level(), expected);
}
