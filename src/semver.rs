//! Dotted numeric versions used for provider releases and protocols.
//!
//! Ordering is lexicographic over the numeric components, and a strict
//! prefix sorts first. No zero padding is applied: `1.0` sorts before
//! `1.0.0`, which keeps already published catalogues in their existing order.

use crate::error::{CatalogueError, Result};
use std::fmt;
use std::str::FromStr;

/// Number of components in a provider release version.
const RELEASE_COMPONENTS: usize = 3;

/// A version parsed from a dot-separated string of non-negative integers.
///
/// The derived ordering on the component vector is exactly the catalogue
/// ordering: the first differing component decides, otherwise the shorter
/// sequence is less.
///
/// # Examples
///
/// ```
/// use registry_catalogue::semver::SemanticVersion;
///
/// let short = SemanticVersion::parse("1.0").expect("valid version");
/// let long = SemanticVersion::parse("1.0.1").expect("valid version");
/// assert!(short.less(&long));
/// assert!(!long.less(&short));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion(Vec<u64>);

impl SemanticVersion {
    /// Parse a dotted numeric version of any length.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidVersion`] if any component is not an
    /// unsigned integer, including empty components.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|e| CatalogueError::InvalidVersion {
                        value: value.to_owned(),
                        reason: format!("component \"{part}\" is not a number: {e}"),
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Parse a provider release version, which must have three components.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidVersion`] if the value does not parse
    /// or does not have exactly three components.
    ///
    /// # Examples
    ///
    /// ```
    /// use registry_catalogue::semver::SemanticVersion;
    ///
    /// assert!(SemanticVersion::parse_release("0.6.1").is_ok());
    /// assert!(SemanticVersion::parse_release("0.6").is_err());
    /// ```
    pub fn parse_release(value: &str) -> Result<Self> {
        let version = Self::parse(value)?;
        if version.0.len() != RELEASE_COMPONENTS {
            return Err(CatalogueError::InvalidVersion {
                value: value.to_owned(),
                reason: format!(
                    "expected {RELEASE_COMPONENTS} components, found {}",
                    version.0.len()
                ),
            });
        }
        Ok(version)
    }

    /// Return true when `self` sorts strictly before `other`.
    #[must_use]
    pub fn less(&self, other: &Self) -> bool {
        self < other
    }

    /// Return the numeric components.
    #[must_use]
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for SemanticVersion {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Compare two version strings, failing if either is malformed.
///
/// # Errors
///
/// Returns [`CatalogueError::InvalidVersion`] if either side does not parse.
pub fn less(a: &str, b: &str) -> Result<bool> {
    Ok(SemanticVersion::parse(a)?.less(&SemanticVersion::parse(b)?))
}
