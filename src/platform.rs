//! Build target identity for a provider binary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An (operating system, CPU architecture) pair.
///
/// Field order matters: the derived ordering sorts by OS first, then by
/// architecture, which is the order platforms are published in.
///
/// # Examples
///
/// ```
/// use registry_catalogue::platform::Platform;
///
/// let darwin = Platform::new("darwin", "arm64");
/// let linux = Platform::new("linux", "amd64");
/// assert!(darwin < linux);
/// assert_eq!(linux.to_string(), "linux_amd64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system name as it appears in the release filename.
    pub os: String,
    /// Architecture name as it appears in the release filename.
    pub arch: String,
}

impl Platform {
    /// Create a platform from its components.
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::os_first(("darwin", "amd64"), ("linux", "386"))]
    #[case::arch_second(("linux", "386"), ("linux", "amd64"))]
    #[case::arch_only_when_os_equal(("linux", "arm64"), ("windows", "amd64"))]
    fn platforms_order_by_os_then_arch(#[case] lower: (&str, &str), #[case] higher: (&str, &str)) {
        let lower = Platform::new(lower.0, lower.1);
        let higher = Platform::new(higher.0, higher.1);
        assert!(lower < higher);
    }

    #[test]
    fn serializes_as_os_and_arch() {
        let json = serde_json::to_string(&Platform::new("linux", "amd64")).expect("serialize");
        assert_eq!(json, r#"{"os":"linux","arch":"amd64"}"#);
    }
}
