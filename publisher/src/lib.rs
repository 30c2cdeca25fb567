//! Provider registry publisher library.
//!
//! This crate provides the plumbing around the `registry-catalogue` core:
//! it lists release artefacts in a website tree, reads their checksum lists,
//! exports the signing key, and writes the registry API documents that
//! changed. It is used by the `registry-publisher` CLI binary.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Validated run settings
//! - [`error`] - Error types
//! - [`publish`] - Read-merge-write orchestration
//! - [`signing_key`] - Public key export through gpg
//! - [`store`] - Object storage over a directory tree

pub mod cli;
pub mod config;
pub mod error;
pub mod publish;
pub mod signing_key;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
