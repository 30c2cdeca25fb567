//! Error types for the registry publisher.
//!
//! Every failure aborts the run. Reads and catalogue computation happen
//! before any document is written, so most errors leave the store untouched.

use camino::Utf8PathBuf;
use registry_catalogue::error::CatalogueError;
use thiserror::Error;

/// Errors that can occur while publishing registry documents.
#[derive(Debug, Error)]
pub enum PublisherError {
    /// Building or merging catalogues failed.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// A command-line value failed validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected value.
        reason: String,
    },

    /// Listing objects under a prefix failed.
    #[error("failed to list objects under {path}: {source}")]
    ListObjects {
        /// Directory that could not be listed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading an object failed for a reason other than its absence.
    #[error("failed to read {path}: {source}")]
    ReadObject {
        /// Object path relative to the store root.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing an object failed.
    #[error("failed to write {path}: {source}")]
    WriteObject {
        /// Object path relative to the store root.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A previously published document is not valid JSON of the expected
    /// shape.
    #[error("failed to parse {path}: {source}")]
    ParseDocument {
        /// Object path of the document.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be serialised.
    #[error("failed to serialise {path}: {source}")]
    SerializeDocument {
        /// Object path of the document.
        path: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// The prefix holds no release artefacts at all.
    #[error("no release files found in {store} at {prefix}")]
    NoReleaseFiles {
        /// Store the prefix was listed in.
        store: String,
        /// Prefix that was listed.
        prefix: String,
    },

    /// The public signing key could not be exported.
    #[error("failed to export public key {fingerprint}: {message}")]
    KeyExport {
        /// Fingerprint passed to gpg.
        fingerprint: String,
        /// Description of the failure, including gpg's stderr.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`PublisherError`].
pub type Result<T> = std::result::Result<T, PublisherError>;
