//! Turn a run's object names into per-binary documents and per-provider
//! catalogues.

use crate::binary::{BinaryExtractor, BinaryMetadata};
use crate::catalogue::ProviderVersions;
use crate::error::{CatalogueError, Result};
use crate::signing_key::PgpSigningKey;
use log::debug;
use std::collections::BTreeMap;

/// Catalogues keyed by provider type name.
pub type ProviderMap = BTreeMap<String, ProviderVersions>;

/// Extract metadata for every binary archive and attach the run's key.
///
/// Object names that are not binary archives (checksum lists, signatures)
/// are dropped without error.
///
/// # Errors
///
/// Returns [`CatalogueError::MissingChecksum`] if an archive has no
/// checksum, or [`CatalogueError::EmptyResult`] if no archive was found.
pub fn build<I, S>(
    extractor: &BinaryExtractor,
    object_names: I,
    signing_key: &PgpSigningKey,
) -> Result<Vec<BinaryMetadata>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut binaries = Vec::new();
    for name in object_names {
        if let Some(mut meta) = extractor.extract(name.as_ref())? {
            meta.attach_signing_key(signing_key);
            binaries.push(meta);
        }
    }
    if binaries.is_empty() {
        return Err(CatalogueError::EmptyResult { what: "binaries" });
    }
    debug!("extracted {} binaries", binaries.len());
    Ok(binaries)
}

/// Group binaries into one catalogue per provider type.
///
/// # Errors
///
/// Returns [`CatalogueError::InvalidVersion`] if a binary carries a malformed
/// version or protocol, or [`CatalogueError::EmptyResult`] if there are no
/// binaries to group.
///
/// # Examples
///
/// ```
/// use registry_catalogue::builder::{build, group_by_provider};
/// use registry_catalogue::binary::BinaryExtractor;
/// use registry_catalogue::checksums::{ChecksumMap, parse_checksum_list};
/// use registry_catalogue::release_name::ReleasePatterns;
/// use registry_catalogue::signing_key::PgpSigningKey;
///
/// let digest = "a".repeat(64);
/// let list = format!(
///     "{digest}  terraform-provider-acme_1.0.0_linux_amd64.zip\n\
///      {digest}  terraform-provider-acme_1.0.0_darwin_arm64.zip\n"
/// );
/// let mut checksums = ChecksumMap::new();
/// parse_checksum_list("SHA256SUMS", &list, &mut checksums).expect("valid list");
///
/// let extractor = BinaryExtractor::new(
///     ReleasePatterns::terraform().expect("built-in patterns compile"),
///     "https://registry.example.com",
///     checksums,
///     vec!["5.0".to_owned()],
/// );
/// let binaries = build(
///     &extractor,
///     [
///         "b/terraform-provider-acme_1.0.0_linux_amd64.zip",
///         "b/terraform-provider-acme_1.0.0_darwin_arm64.zip",
///         "b/terraform-provider-acme_1.0.0_SHA256SUMS",
///     ],
///     &PgpSigningKey::new("KEY", "ARMOR"),
/// )
/// .expect("two binaries");
///
/// let providers = group_by_provider(&binaries).expect("one provider");
/// let acme = &providers["acme"];
/// assert_eq!(acme.versions.len(), 1);
/// assert_eq!(acme.versions[0].platforms.len(), 2);
/// ```
pub fn group_by_provider(binaries: &[BinaryMetadata]) -> Result<ProviderMap> {
    let mut providers = ProviderMap::new();
    for meta in binaries {
        providers
            .entry(meta.type_name.clone())
            .or_default()
            .add_binary(meta)?;
    }
    if providers.is_empty() {
        return Err(CatalogueError::EmptyResult { what: "providers" });
    }
    Ok(providers)
}
