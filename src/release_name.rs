//! Release artefact name classification.
//!
//! Object names pass through two independent stages:
//!
//! 1. [`ReleasePatterns::is_release_artefact`] is the boundary filter. It
//!    accepts anything that looks like part of a provider release: binary
//!    archives, checksum lists, and their signatures.
//! 2. [`ReleasePatterns::parse_binary`] is the structured parser. It accepts
//!    only binary archives and extracts the provider type, version, OS, and
//!    architecture.
//!
//! Both stages match against the basename of the object name.

use crate::error::{CatalogueError, Result};
use crate::platform::Platform;
use log::info;
use regex::Regex;

/// Filename prefix used by provider release archives.
pub const DEFAULT_NAME_PREFIX: &str = "terraform-provider-";

/// Compiled release-name patterns for one filename prefix.
///
/// Build one value per run and pass it to the stages that need it.
///
/// # Examples
///
/// ```
/// use registry_catalogue::release_name::ReleasePatterns;
///
/// let patterns = ReleasePatterns::terraform().expect("built-in patterns compile");
/// assert!(patterns.is_release_artefact("terraform-provider-acme_1.2.0_SHA256SUMS"));
///
/// let name = patterns
///     .parse_binary("terraform-provider-acme_1.2.0_linux_amd64.zip")
///     .expect("binary archive");
/// assert_eq!(name.type_name, "acme");
/// assert_eq!(name.version, "1.2.0");
/// ```
#[derive(Debug, Clone)]
pub struct ReleasePatterns {
    name_prefix: String,
    release_artefact: Regex,
    binary_archive: Regex,
}

/// Fields extracted from a binary archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryName {
    /// Provider type, e.g. `acme` in `terraform-provider-acme_...`.
    pub type_name: String,
    /// Three-component release version.
    pub version: String,
    /// Target operating system.
    pub os: String,
    /// Target architecture.
    pub arch: String,
}

impl BinaryName {
    /// Return the build target of the archive.
    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::new(self.os.clone(), self.arch.clone())
    }
}

impl ReleasePatterns {
    /// Compile the patterns for archives named `<name_prefix><type>_...`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidPattern`] if the patterns fail to
    /// compile.
    pub fn new(name_prefix: &str) -> Result<Self> {
        let prefix = regex::escape(name_prefix);
        let identity = r"(?P<type>[^_]+)_(?P<version>[0-9]+\.[0-9]+\.[0-9]+)";
        let release_artefact = compile(
            name_prefix,
            &format!(r"^{prefix}{identity}_(?:SHA256SUMS.*|[^_]+_[^.]+\.zip)$"),
        )?;
        let binary_archive = compile(
            name_prefix,
            &format!(r"^{prefix}{identity}_(?P<os>[^_]+)_(?P<arch>[^.]+)\.zip$"),
        )?;
        Ok(Self {
            name_prefix: name_prefix.to_owned(),
            release_artefact,
            binary_archive,
        })
    }

    /// Compile the patterns for the standard `terraform-provider-` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidPattern`] if the patterns fail to
    /// compile.
    pub fn terraform() -> Result<Self> {
        Self::new(DEFAULT_NAME_PREFIX)
    }

    /// Return the filename prefix the patterns were built for.
    #[must_use]
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// Return true when the object looks like part of a provider release.
    #[must_use]
    pub fn is_release_artefact(&self, object_name: &str) -> bool {
        self.release_artefact.is_match(basename(object_name))
    }

    /// Parse a binary archive name, returning `None` for anything else.
    #[must_use]
    pub fn parse_binary(&self, object_name: &str) -> Option<BinaryName> {
        let captures = self.binary_archive.captures(basename(object_name))?;
        let field = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_owned())
                .unwrap_or_default()
        };
        Some(BinaryName {
            type_name: field("type"),
            version: field("version"),
            os: field("os"),
            arch: field("arch"),
        })
    }

    /// Name of the checksum list published alongside a provider version.
    #[must_use]
    pub fn checksum_list_name(&self, type_name: &str, version: &str) -> String {
        format!("{}{type_name}_{version}_SHA256SUMS", self.name_prefix)
    }
}

fn compile(name_prefix: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CatalogueError::InvalidPattern {
        prefix: name_prefix.to_owned(),
        reason: e.to_string(),
    })
}

/// Return the final path segment of an object name.
#[must_use]
pub fn basename(object_name: &str) -> &str {
    object_name
        .rsplit_once('/')
        .map_or(object_name, |(_, base)| base)
}

/// Return everything before the final path segment, if there is a directory.
#[must_use]
pub fn dirname(object_name: &str) -> Option<&str> {
    object_name
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .filter(|dir| !dir.is_empty())
}

/// Keep the object names that look like release artefacts.
///
/// Everything else is logged and dropped; an unrecognised name is never an
/// error.
#[must_use]
pub fn filter_release_artefacts<I, S>(patterns: &ReleasePatterns, object_names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    object_names
        .into_iter()
        .map(Into::into)
        .filter(|name| {
            let keep = patterns.is_release_artefact(name);
            if !keep {
                info!("skipping {name}");
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn patterns() -> ReleasePatterns {
        ReleasePatterns::terraform().expect("built-in patterns compile")
    }

    #[rstest]
    #[case::archive("binaries/terraform-provider-acme_1.2.0_linux_amd64.zip")]
    #[case::checksums("binaries/terraform-provider-acme_1.2.0_SHA256SUMS")]
    #[case::signature("binaries/terraform-provider-acme_1.2.0_SHA256SUMS.sig")]
    #[case::no_directory("terraform-provider-acme_1.2.0_darwin_arm64.zip")]
    fn release_artefacts_pass_the_filter(patterns: ReleasePatterns, #[case] name: &str) {
        assert!(patterns.is_release_artefact(name));
    }

    #[rstest]
    #[case::readme("binaries/README.md")]
    #[case::two_part_version("binaries/terraform-provider-acme_1.2_linux_amd64.zip")]
    #[case::tarball("binaries/terraform-provider-acme_1.2.0_linux_amd64.tar.gz")]
    #[case::other_prefix("binaries/packer-plugin-acme_1.2.0_linux_amd64.zip")]
    #[case::manifest("binaries/terraform-provider-acme_1.2.0_manifest.json")]
    fn other_objects_fail_the_filter(patterns: ReleasePatterns, #[case] name: &str) {
        assert!(!patterns.is_release_artefact(name));
    }

    #[rstest]
    fn parse_binary_extracts_fields(patterns: ReleasePatterns) {
        let name = patterns
            .parse_binary("binaries/terraform-provider-acme_1.2.0_linux_amd64.zip")
            .expect("binary archive");
        assert_eq!(
            name,
            BinaryName {
                type_name: "acme".to_owned(),
                version: "1.2.0".to_owned(),
                os: "linux".to_owned(),
                arch: "amd64".to_owned(),
            }
        );
        assert_eq!(name.platform(), Platform::new("linux", "amd64"));
    }

    #[rstest]
    fn parse_binary_keeps_dashes_in_type_name(patterns: ReleasePatterns) {
        let name = patterns
            .parse_binary("terraform-provider-google-beta_4.0.1_windows_386.zip")
            .expect("binary archive");
        assert_eq!(name.type_name, "google-beta");
        assert_eq!(name.arch, "386");
    }

    #[rstest]
    #[case::checksums("terraform-provider-acme_1.2.0_SHA256SUMS")]
    #[case::signature("terraform-provider-acme_1.2.0_SHA256SUMS.sig")]
    #[case::unrelated("index.html")]
    fn parse_binary_rejects_non_archives(patterns: ReleasePatterns, #[case] name: &str) {
        assert!(patterns.parse_binary(name).is_none());
    }

    #[test]
    fn custom_prefix_is_escaped() {
        let patterns = ReleasePatterns::new("my.provider-").expect("compiles");
        assert!(patterns.parse_binary("my.provider-x_1.0.0_linux_amd64.zip").is_some());
        assert!(patterns.parse_binary("myXprovider-x_1.0.0_linux_amd64.zip").is_none());
    }

    #[rstest]
    fn checksum_list_name_uses_prefix(patterns: ReleasePatterns) {
        assert_eq!(
            patterns.checksum_list_name("acme", "1.2.0"),
            "terraform-provider-acme_1.2.0_SHA256SUMS"
        );
    }

    #[rstest]
    #[case("a/b/c.zip", "c.zip", Some("a/b"))]
    #[case("c.zip", "c.zip", None)]
    #[case("/c.zip", "c.zip", None)]
    fn path_helpers_split_object_names(
        #[case] name: &str,
        #[case] base: &str,
        #[case] dir: Option<&str>,
    ) {
        assert_eq!(basename(name), base);
        assert_eq!(dirname(name), dir);
    }

    #[rstest]
    fn filter_keeps_order_and_drops_unrecognised(patterns: ReleasePatterns) {
        let kept = filter_release_artefacts(
            &patterns,
            [
                "b/terraform-provider-acme_1.2.0_SHA256SUMS",
                "b/notes.txt",
                "b/terraform-provider-acme_1.2.0_linux_amd64.zip",
            ],
        );
        assert_eq!(
            kept,
            [
                "b/terraform-provider-acme_1.2.0_SHA256SUMS",
                "b/terraform-provider-acme_1.2.0_linux_amd64.zip",
            ]
        );
    }
}
