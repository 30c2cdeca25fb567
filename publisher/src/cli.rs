//! CLI argument definitions for the registry publisher.
//!
//! This module defines the command-line interface using clap. Values are
//! validated separately by [`crate::config::PublishConfig::from_cli`].

use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;
use registry_catalogue::protocol::DEFAULT_PROTOCOLS;

/// Generate provider registry API documents for released provider binaries.
#[derive(Parser, Debug, Clone)]
#[command(name = "registry-publisher")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate provider registry API documents for released provider binaries.\n\n",
    "Scans PREFIX in the website tree for provider archives and their SHA256SUMS ",
    "lists, then writes one download document per archive and merges a versions ",
    "document per provider under v1/providers/NAMESPACE. Documents that are already ",
    "up to date are left untouched.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish binaries stored under binaries/:\n",
    "    $ registry-publisher --store-dir ./site --prefix binaries \\\n",
    "        --url https://registry.example.com --namespace acme-corp\n\n",
    "  Preview without writing:\n",
    "    $ registry-publisher --store-dir ./site --prefix binaries \\\n",
    "        --url https://registry.example.com --namespace acme-corp --dry-run",
))]
pub struct Cli {
    /// Root directory of the website containing binaries and documents.
    #[arg(long, value_name = "DIR")]
    pub store_dir: Utf8PathBuf,

    /// Location of the released binaries within the website.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: String,

    /// Base URL of the static website.
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Namespace of the providers.
    #[arg(long, value_name = "NAMESPACE")]
    pub namespace: String,

    /// Comma-separated list of protocol versions supported by the providers.
    #[arg(long, value_name = "LIST", default_value = DEFAULT_PROTOCOLS)]
    pub protocols: String,

    /// Fingerprint of the key that signed the checksum lists.
    #[arg(long, value_name = "FINGERPRINT", env = "GPG_FINGERPRINT")]
    pub fingerprint: Option<String>,

    /// Compute and report changes without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v` and `-q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use log::LevelFilter;
    /// use registry_publisher::cli::Cli;
    ///
    /// let cli = Cli::parse_from([
    ///     "registry-publisher", "--store-dir", "site", "--prefix", "b",
    ///     "--url", "https://r.example.com", "--namespace", "ns", "-v",
    /// ]);
    /// assert_eq!(cli.log_level(), LevelFilter::Debug);
    /// ```
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
