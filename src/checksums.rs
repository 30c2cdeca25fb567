//! Checksum-list parsing.
//!
//! Release pipelines publish one `..._SHA256SUMS` file per provider version,
//! with one `<hex digest> <filename>` pair per line. All lists read during a
//! run are folded into a single [`ChecksumMap`] keyed by filename.

use crate::error::{CatalogueError, Result};
use crate::sha256_digest::Sha256Digest;
use log::debug;
use std::collections::BTreeMap;

/// Suffix identifying checksum-list objects.
pub const CHECKSUM_LIST_SUFFIX: &str = "SHA256SUMS";

/// Mapping from archive basename to its SHA-256 digest.
pub type ChecksumMap = BTreeMap<String, Sha256Digest>;

/// Return true when `object_name` names a checksum list.
///
/// Signature files (`..._SHA256SUMS.sig`) are not checksum lists.
#[must_use]
pub fn is_checksum_list(object_name: &str) -> bool {
    object_name.ends_with(CHECKSUM_LIST_SUFFIX)
}

/// Parse the content of a checksum list into `checksums`.
///
/// Blank lines are ignored. A later entry for the same filename replaces an
/// earlier one.
///
/// # Errors
///
/// Returns [`CatalogueError::MalformedChecksumLine`] when a line does not
/// have exactly two whitespace-separated fields, and
/// [`CatalogueError::InvalidSha256Digest`] when the digest is malformed.
///
/// # Examples
///
/// ```
/// use registry_catalogue::checksums::{ChecksumMap, parse_checksum_list};
///
/// let content = format!("{}  terraform-provider-acme_1.2.0_linux_amd64.zip\n", "b".repeat(64));
/// let mut checksums = ChecksumMap::new();
/// parse_checksum_list("acme_SHA256SUMS", &content, &mut checksums).expect("valid list");
/// assert!(checksums.contains_key("terraform-provider-acme_1.2.0_linux_amd64.zip"));
/// ```
pub fn parse_checksum_list(
    source_name: &str,
    content: &str,
    checksums: &mut ChecksumMap,
) -> Result<()> {
    for (index, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => {}
            [digest, filename] => {
                let digest = Sha256Digest::try_from(*digest)?;
                debug!("{source_name}: {filename} has checksum {digest}");
                checksums.insert((*filename).to_owned(), digest);
            }
            other => {
                return Err(CatalogueError::MalformedChecksumLine {
                    source_name: source_name.to_owned(),
                    line: index + 1,
                    found: other.len(),
                });
            }
        }
    }
    Ok(())
}
