//! Provider version catalogue and its merge engine.
//!
//! A [`ProviderVersions`] document lists every published version of one
//! provider with the protocols it speaks and the platforms it ships for. It
//! is served at `v1/providers/<namespace>/<type>/versions`:
//!
//! ```json
//! {"versions": [{"version": "0.6.1", "protocols": ["5.0"],
//!                "platforms": [{"os": "linux", "arch": "amd64"}]}]}
//! ```
//!
//! Versions, protocols, and platforms behave as sorted sets. Every mutation
//! leaves them deduplicated and sorted, so serialising the same set of
//! facts always yields the same bytes regardless of insertion order.

use crate::binary::BinaryMetadata;
use crate::error::Result;
use crate::platform::Platform;
use crate::semver::SemanticVersion;
use serde::{Deserialize, Serialize};

/// One version of one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersion {
    /// Three-component release version.
    pub version: String,
    /// Supported protocol versions, sorted by semantic version.
    #[serde(default)]
    pub protocols: Vec<String>,
    /// Shipped platforms, sorted by OS then architecture.
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl ProviderVersion {
    /// Create an entry with no protocols or platforms.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            protocols: Vec::new(),
            platforms: Vec::new(),
        }
    }

    /// Add a protocol unless an identical string is already present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CatalogueError::InvalidVersion`] if any
    /// protocol in the resulting set is not a dotted numeric version. The
    /// entry is left unchanged in that case.
    pub fn add_protocol(&mut self, protocol: &str) -> Result<()> {
        if self.protocols.iter().any(|p| p == protocol) {
            return Ok(());
        }
        let mut protocols = self.protocols.clone();
        protocols.push(protocol.to_owned());
        self.protocols = sorted_by_version(protocols, SemanticVersion::parse)?;
        Ok(())
    }

    /// Add each protocol in turn.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::add_protocol`] does. None of the protocols are added
    /// when any of them is rejected.
    pub fn add_protocols<S: AsRef<str>>(&mut self, protocols: &[S]) -> Result<()> {
        let mut updated = self.clone();
        for protocol in protocols {
            updated.add_protocol(protocol.as_ref())?;
        }
        *self = updated;
        Ok(())
    }

    /// Add a platform unless an equal one is already present.
    pub fn add_platform(&mut self, platform: Platform) {
        if self.platforms.contains(&platform) {
            return;
        }
        self.platforms.push(platform);
        self.platforms.sort();
    }

    /// Add each platform in turn.
    pub fn add_platforms(&mut self, platforms: &[Platform]) {
        for platform in platforms {
            self.add_platform(platform.clone());
        }
    }
}

/// The catalogue of one provider: every version it has published.
///
/// # Examples
///
/// ```
/// use registry_catalogue::catalogue::{ProviderVersion, ProviderVersions};
/// use registry_catalogue::platform::Platform;
///
/// let mut published = ProviderVersions::default();
/// let mut release = ProviderVersion::new("0.6.1");
/// release.add_protocol("5.0").expect("valid protocol");
/// release.add_platform(Platform::new("linux", "amd64"));
///
/// let discovered = ProviderVersions { versions: vec![release] };
/// published.merge(&discovered).expect("valid versions");
/// published.merge(&discovered).expect("valid versions");
/// assert_eq!(published, discovered);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersions {
    /// Published versions, sorted ascending by semantic version.
    #[serde(default)]
    pub versions: Vec<ProviderVersion>,
}

impl ProviderVersions {
    /// Return true when no versions are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Look up the entry for an exact version string.
    #[must_use]
    pub fn find_version(&self, version: &str) -> Option<&ProviderVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    fn find_version_mut(&mut self, version: &str) -> Option<&mut ProviderVersion> {
        self.versions.iter_mut().find(|v| v.version == version)
    }

    /// Record a binary: its version, protocols, and platform.
    ///
    /// Creating a new entry and updating an existing one produce the same
    /// state, so the order in which binaries are added does not matter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CatalogueError::InvalidVersion`] if the
    /// release version or a protocol is malformed. The catalogue is left
    /// unchanged in that case.
    pub fn add_binary(&mut self, meta: &BinaryMetadata) -> Result<()> {
        let mut updated = self.clone();
        if let Some(existing) = updated.find_version_mut(&meta.version) {
            existing.add_protocols(&meta.protocols)?;
            existing.add_platform(meta.platform());
        } else {
            let mut entry = ProviderVersion::new(meta.version.clone());
            entry.add_protocols(&meta.protocols)?;
            entry.add_platform(meta.platform());
            updated.insert_version(entry)?;
        }
        *self = updated;
        Ok(())
    }

    /// Merge `source` into `self` without losing any existing entry.
    ///
    /// Versions missing from `self` are appended as they are; versions
    /// present in both have their protocols and platforms unioned. Merging
    /// the same source twice has the same effect as merging it once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CatalogueError::InvalidVersion`] if a version
    /// or protocol on either side is malformed. Nothing from `source` is
    /// kept when any entry is rejected.
    pub fn merge(&mut self, source: &Self) -> Result<()> {
        let mut merged = self.clone();
        for version in &source.versions {
            match merged.find_version_mut(&version.version) {
                Some(existing) => {
                    existing.add_protocols(&version.protocols)?;
                    existing.add_platforms(&version.platforms);
                }
                None => merged.insert_version(version.clone())?,
            }
        }
        *self = merged;
        Ok(())
    }

    fn insert_version(&mut self, entry: ProviderVersion) -> Result<()> {
        let mut versions = self.versions.clone();
        versions.push(entry);
        let keyed = versions
            .into_iter()
            .map(|v| Ok((SemanticVersion::parse_release(&v.version)?, v)))
            .collect::<Result<Vec<_>>>()?;
        self.versions = sort_keyed(keyed, |v| v.version.as_str());
        Ok(())
    }
}

/// Sort version strings by their parsed value.
fn sorted_by_version(
    values: Vec<String>,
    parse: fn(&str) -> Result<SemanticVersion>,
) -> Result<Vec<String>> {
    let keyed = values
        .into_iter()
        .map(|value| Ok((parse(&value)?, value)))
        .collect::<Result<Vec<_>>>()?;
    Ok(sort_keyed(keyed, String::as_str))
}

/// Sort by parsed version, breaking ties on the raw string so that values
/// such as `1.0` and `01.0` still order deterministically.
fn sort_keyed<T>(mut keyed: Vec<(SemanticVersion, T)>, raw: fn(&T) -> &str) -> Vec<T> {
    keyed.sort_by(|(a, a_item), (b, b_item)| a.cmp(b).then_with(|| raw(a_item).cmp(raw(b_item))));
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
