//! Error types for release name parsing, catalogue construction, and merging.
//!
//! Each variant names the offending input and the constraint it violated.
//! Unrecognised object names are not errors: they are logged and skipped by
//! [`crate::release_name::filter_release_artefacts`].

use thiserror::Error;

/// Errors arising while building or merging provider catalogues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// A provider version or protocol version is not a dotted numeric string.
    #[error("invalid version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A binary archive matched the release pattern but has no checksum entry.
    #[error("no checksum found for {filename}; the checksum list is incomplete")]
    MissingChecksum {
        /// Basename of the archive without a checksum.
        filename: String,
    },

    /// Filtering produced nothing to publish.
    #[error("no provider {what} detected")]
    EmptyResult {
        /// What turned out to be empty (`binaries` or `providers`).
        what: &'static str,
    },

    /// A checksum list line does not have exactly two fields.
    #[error("expected {source_name} to contain 2 fields on line {line}, found {found}")]
    MalformedChecksumLine {
        /// Name of the checksum list being parsed.
        source_name: String,
        /// One-based line number.
        line: usize,
        /// Number of whitespace-separated fields found.
        found: usize,
    },

    /// A SHA-256 digest is not a 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A protocol version does not have the `<major>.<minor>` shape.
    #[error("{value} is not a protocol version number")]
    InvalidProtocol {
        /// The rejected protocol string.
        value: String,
    },

    /// The protocol list is empty.
    #[error("no protocols specified")]
    NoProtocols,

    /// The protocol pattern could not be compiled.
    #[error("invalid protocol pattern: {reason}")]
    InvalidProtocolPattern {
        /// Description of the compilation failure.
        reason: String,
    },

    /// A release name pattern could not be compiled.
    #[error("invalid release name pattern for prefix \"{prefix}\": {reason}")]
    InvalidPattern {
        /// The filename prefix the pattern was built from.
        prefix: String,
        /// Description of the compilation failure.
        reason: String,
    },
}

/// Result type alias using [`CatalogueError`].
pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_checksum_names_the_file() {
        let err = CatalogueError::MissingChecksum {
            filename: "terraform-provider-acme_1.2.0_linux_amd64.zip".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("terraform-provider-acme_1.2.0_linux_amd64.zip"));
    }

    #[test]
    fn malformed_checksum_line_reports_position() {
        let err = CatalogueError::MalformedChecksumLine {
            source_name: "SHA256SUMS".to_owned(),
            line: 3,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "expected SHA256SUMS to contain 2 fields on line 3, found 1"
        );
    }

    #[test]
    fn empty_result_names_what_was_empty() {
        let err = CatalogueError::EmptyResult { what: "binaries" };
        assert_eq!(err.to_string(), "no provider binaries detected");
    }
}
