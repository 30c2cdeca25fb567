//! Per-binary download metadata and its extraction from object names.
//!
//! [`BinaryMetadata`] is the document served at
//! `v1/providers/<namespace>/<type>/<version>/download/<os>/<arch>`.
//! [`BinaryExtractor`] turns an object name into that document using the
//! run's base URL, checksum map, and protocol list.

use crate::checksums::ChecksumMap;
use crate::error::{CatalogueError, Result};
use crate::platform::Platform;
use crate::release_name::{ReleasePatterns, basename, dirname};
use crate::sha256_digest::Sha256Digest;
use crate::signing_key::{PgpSigningKey, SigningKeys};
use log::debug;
use serde::{Deserialize, Serialize};

/// Download metadata for one released provider binary.
///
/// `type_name` and `version` identify where the document is published and
/// which catalogue entry it feeds; they are not part of the serialised form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryMetadata {
    /// Protocol versions the binary speaks.
    pub protocols: Vec<String>,
    /// Target operating system.
    pub os: String,
    /// Target architecture.
    pub arch: String,
    /// Archive basename.
    pub filename: String,
    /// Absolute URL of the archive.
    pub download_url: String,
    /// Absolute URL of the version's checksum list.
    pub shasums_url: String,
    /// Absolute URL of the checksum list's detached signature.
    pub shasums_signature_url: String,
    /// SHA-256 digest of the archive.
    pub shasum: Sha256Digest,
    /// Keys that may have signed the checksum list.
    #[serde(default)]
    pub signing_keys: SigningKeys,
    /// Provider release version.
    #[serde(skip)]
    pub version: String,
    /// Provider type name.
    #[serde(skip)]
    pub type_name: String,
}

impl BinaryMetadata {
    /// Return the build target of the binary.
    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::new(self.os.clone(), self.arch.clone())
    }

    /// Replace the signing keys with the run's single key.
    pub fn attach_signing_key(&mut self, key: &PgpSigningKey) {
        self.signing_keys = SigningKeys::single(key);
    }

    /// Return true when both documents would serialise identically.
    ///
    /// The internal `type_name` and `version` tags are ignored, so a freshly
    /// extracted record compares equal to the same document read back from
    /// storage.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.os == other.os
            && self.arch == other.arch
            && self.filename == other.filename
            && self.download_url == other.download_url
            && self.shasums_url == other.shasums_url
            && self.shasums_signature_url == other.shasums_signature_url
            && self.shasum == other.shasum
            && self.protocols == other.protocols
            && self.signing_keys == other.signing_keys
    }
}

/// Builds [`BinaryMetadata`] records for one publish run.
///
/// All inputs are fixed at construction so extraction is a pure function of
/// the object name.
///
/// # Examples
///
/// ```
/// use registry_catalogue::binary::BinaryExtractor;
/// use registry_catalogue::checksums::ChecksumMap;
/// use registry_catalogue::release_name::ReleasePatterns;
/// use registry_catalogue::sha256_digest::Sha256Digest;
///
/// let mut checksums = ChecksumMap::new();
/// checksums.insert(
///     "terraform-provider-acme_1.2.0_linux_amd64.zip".to_owned(),
///     Sha256Digest::try_from("c".repeat(64)).expect("valid digest"),
/// );
/// let extractor = BinaryExtractor::new(
///     ReleasePatterns::terraform().expect("built-in patterns compile"),
///     "https://registry.example.com",
///     checksums,
///     vec!["5.0".to_owned()],
/// );
///
/// let meta = extractor
///     .extract("binaries/terraform-provider-acme_1.2.0_linux_amd64.zip")
///     .expect("checksum present")
///     .expect("binary archive");
/// assert_eq!(
///     meta.download_url,
///     "https://registry.example.com/binaries/terraform-provider-acme_1.2.0_linux_amd64.zip"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BinaryExtractor {
    patterns: ReleasePatterns,
    base_url: String,
    checksums: ChecksumMap,
    protocols: Vec<String>,
}

impl BinaryExtractor {
    /// Create an extractor. A trailing slash on `base_url` is ignored.
    #[must_use]
    pub fn new(
        patterns: ReleasePatterns,
        base_url: &str,
        checksums: ChecksumMap,
        protocols: Vec<String>,
    ) -> Self {
        Self {
            patterns,
            base_url: base_url.trim_end_matches('/').to_owned(),
            checksums,
            protocols,
        }
    }

    /// Return the patterns used for classification.
    #[must_use]
    pub fn patterns(&self) -> &ReleasePatterns {
        &self.patterns
    }

    /// Extract metadata for a binary archive.
    ///
    /// Returns `Ok(None)` for object names that are not binary archives.
    /// Signing keys are left empty; see [`BinaryMetadata::attach_signing_key`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::MissingChecksum`] if the archive has no entry
    /// in the checksum map.
    pub fn extract(&self, object_name: &str) -> Result<Option<BinaryMetadata>> {
        let object_name = object_name.trim_start_matches('/');
        let Some(name) = self.patterns.parse_binary(object_name) else {
            return Ok(None);
        };
        let filename = basename(object_name).to_owned();
        let shasum = self
            .checksums
            .get(&filename)
            .cloned()
            .ok_or_else(|| CatalogueError::MissingChecksum {
                filename: filename.clone(),
            })?;

        let directory_url = match dirname(object_name) {
            Some(dir) => format!("{}/{dir}", self.base_url),
            None => self.base_url.clone(),
        };
        let shasums_url = format!(
            "{directory_url}/{}",
            self.patterns.checksum_list_name(&name.type_name, &name.version)
        );
        debug!("extracted {} {} for {}", name.type_name, name.version, name.platform());

        Ok(Some(BinaryMetadata {
            protocols: self.protocols.clone(),
            os: name.os,
            arch: name.arch,
            download_url: format!("{}/{object_name}", self.base_url),
            shasums_signature_url: format!("{shasums_url}.sig"),
            shasums_url,
            filename,
            shasum,
            signing_keys: SigningKeys::default(),
            version: name.version,
            type_name: name.type_name,
        }))
    }
}

#[cfg(test)]
#[path = "binary_tests.rs"]
mod tests;
