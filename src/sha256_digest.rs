//! Digest column of a `SHA256SUMS` list.
//!
//! `sha256sum` writes each digest as 64 lowercase hex characters, and the
//! registry republishes that value verbatim as the `shasum` of a download
//! document. [`Sha256Digest`] holds one such value. Digests read back from
//! already published documents are checked the same way as digests read from
//! a checksum list.

use crate::error::{CatalogueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const SHA256_HEX_CHARS: usize = 64;

/// The checksum of one release archive, as listed in its `SHA256SUMS` file.
///
/// # Examples
///
/// ```
/// use registry_catalogue::sha256_digest::Sha256Digest;
///
/// let line = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855  empty.zip";
/// let (column, _) = line.split_once("  ").expect("two columns");
/// let digest = Sha256Digest::try_from(column).expect("sha256sum output");
/// assert_eq!(digest.to_string(), column);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Borrow the hex text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = CatalogueError;

    fn try_from(column: String) -> Result<Self> {
        check_column(&column)?;
        Ok(Self(column))
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = CatalogueError;

    fn try_from(column: &str) -> Result<Self> {
        Self::try_from(column.to_owned())
    }
}

impl From<Sha256Digest> for String {
    fn from(digest: Sha256Digest) -> Self {
        digest.0
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_column(column: &str) -> Result<()> {
    let reason = if column.len() != SHA256_HEX_CHARS {
        format!(
            "{} characters where sha256sum writes {SHA256_HEX_CHARS}",
            column.len()
        )
    } else if let Some(bad) = column
        .chars()
        .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        if bad.is_ascii_hexdigit() {
            format!("uppercase hex digit '{bad}'")
        } else {
            format!("'{bad}' is not a hex digit")
        }
    } else {
        return Ok(());
    };
    Err(CatalogueError::InvalidSha256Digest { reason })
}
