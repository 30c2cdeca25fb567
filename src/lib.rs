//! Provider release metadata model and catalogue merge engine.
//!
//! This crate turns the object names of released provider binaries into the
//! documents of a static provider registry: one download document per binary
//! and one `versions` catalogue per provider. It performs no I/O; callers
//! supply object names and checksum lists and persist the results.
//!
//! # Modules
//!
//! - [`semver`] - Dotted numeric versions and their ordering
//! - [`platform`] - Operating system and architecture pairs
//! - [`sha256_digest`] - Validated SHA-256 hex digests
//! - [`checksums`] - `SHA256SUMS` list parsing
//! - [`release_name`] - Release artefact filtering and binary name parsing
//! - [`signing_key`] - GPG signing key blocks
//! - [`binary`] - Per-binary download metadata
//! - [`catalogue`] - Per-provider version catalogues and merging
//! - [`builder`] - Object names to binaries to catalogues
//! - [`protocol`] - Protocol list validation
//! - [`layout`] - Registry API object paths
//! - [`error`] - Error types

pub mod binary;
pub mod builder;
pub mod catalogue;
pub mod checksums;
pub mod error;
pub mod layout;
pub mod platform;
pub mod protocol;
pub mod release_name;
pub mod semver;
pub mod sha256_digest;
pub mod signing_key;

pub use binary::{BinaryExtractor, BinaryMetadata};
pub use catalogue::{ProviderVersion, ProviderVersions};
pub use error::{CatalogueError, Result};
pub use platform::Platform;
pub use semver::SemanticVersion;
