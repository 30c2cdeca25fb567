//! Validated settings for one publish run.

use crate::cli::Cli;
use crate::error::{PublisherError, Result};
use crate::signing_key::FINGERPRINT_ENV;
use camino::Utf8PathBuf;
use registry_catalogue::protocol::parse_protocols;

/// Immutable settings derived from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Root directory of the website.
    pub store_dir: Utf8PathBuf,
    /// Location of the released binaries, without leading or trailing `/`.
    pub prefix: String,
    /// Base URL of the website, without a trailing `/`.
    pub base_url: String,
    /// Provider namespace.
    pub namespace: String,
    /// Validated protocol versions.
    pub protocols: Vec<String>,
    /// Fingerprint of the signing key.
    pub fingerprint: String,
    /// Skip all writes.
    pub dry_run: bool,
}

impl PublishConfig {
    /// Validate the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::InvalidConfig`] for an empty URL, namespace,
    /// or fingerprint, and a catalogue error for a malformed protocol list.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let protocols = parse_protocols(&cli.protocols)?;

        let fingerprint = cli
            .fingerprint
            .as_deref()
            .map(str::trim)
            .filter(|fp| !fp.is_empty())
            .ok_or_else(|| invalid(format!(
                "no fingerprint specified; pass --fingerprint or set {FINGERPRINT_ENV}"
            )))?;

        let namespace = cli.namespace.trim();
        if namespace.is_empty() || namespace.contains('/') {
            return Err(invalid(format!(
                "namespace \"{}\" must be a single non-empty path segment",
                cli.namespace
            )));
        }

        let base_url = cli.url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(invalid("no website URL specified".to_owned()));
        }

        Ok(Self {
            store_dir: cli.store_dir.clone(),
            prefix: cli.prefix.trim_matches('/').to_owned(),
            base_url: base_url.to_owned(),
            namespace: namespace.to_owned(),
            protocols,
            fingerprint: fingerprint.to_owned(),
            dry_run: cli.dry_run,
        })
    }
}

fn invalid(reason: String) -> PublisherError {
    PublisherError::InvalidConfig { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use registry_catalogue::error::CatalogueError;
    use rstest::rstest;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec![
            "registry-publisher",
            "--store-dir",
            "/srv/site",
            "--prefix",
            "/binaries/",
            "--namespace",
            "acme-corp",
        ];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn from_cli_normalises_values() {
        let config = PublishConfig::from_cli(&cli(&[
            "--url",
            "https://registry.example.com/",
            "--fingerprint",
            " ABCD ",
            "--protocols",
            "5.0,5.1",
        ]))
        .expect("valid configuration");

        assert_eq!(
            config,
            PublishConfig {
                store_dir: Utf8PathBuf::from("/srv/site"),
                prefix: "binaries".to_owned(),
                base_url: "https://registry.example.com".to_owned(),
                namespace: "acme-corp".to_owned(),
                protocols: vec!["5.0".to_owned(), "5.1".to_owned()],
                fingerprint: "ABCD".to_owned(),
                dry_run: false,
            }
        );
    }

    #[test]
    fn from_cli_rejects_blank_fingerprint() {
        let err = PublishConfig::from_cli(&cli(&["--url", "https://r", "--fingerprint", " "]))
            .expect_err("blank fingerprint");
        assert!(err.to_string().contains("no fingerprint specified"));
    }

    #[rstest]
    #[case::single_component("5")]
    #[case::trailing_garbage("5.0,latest")]
    fn from_cli_rejects_bad_protocols(#[case] protocols: &str) {
        let err = PublishConfig::from_cli(&cli(&[
            "--url",
            "https://r",
            "--fingerprint",
            "ABCD",
            "--protocols",
            protocols,
        ]))
        .expect_err("bad protocol");
        assert!(matches!(
            err,
            PublisherError::Catalogue(CatalogueError::InvalidProtocol { .. })
        ));
    }

    #[test]
    fn from_cli_rejects_empty_url() {
        let err = PublishConfig::from_cli(&cli(&["--url", "/", "--fingerprint", "ABCD"]))
            .expect_err("empty URL");
        assert!(matches!(err, PublisherError::InvalidConfig { .. }));
    }

    #[test]
    fn from_cli_rejects_nested_namespace() {
        let mut parsed = cli(&["--url", "https://r", "--fingerprint", "ABCD"]);
        parsed.namespace = "a/b".to_owned();
        let err = PublishConfig::from_cli(&parsed).expect_err("nested namespace");
        assert!(err.to_string().contains("a/b"));
    }
}
