//! Read-merge-write orchestration for one publish run.
//!
//! A run lists the release artefacts under the configured prefix, reads every
//! checksum list, builds the per-binary and per-provider documents, and
//! compares them with what is already published. Every read and every merge
//! happens in [`plan`] before anything is written; [`PublishPlan::apply`]
//! then writes only the documents that changed.

use crate::config::PublishConfig;
use crate::error::{PublisherError, Result};
use crate::store::{ObjectStore, read_json, render_json};
use log::{info, warn};
use registry_catalogue::binary::{BinaryExtractor, BinaryMetadata};
use registry_catalogue::builder::{build, group_by_provider};
use registry_catalogue::catalogue::ProviderVersions;
use registry_catalogue::checksums::{ChecksumMap, is_checksum_list, parse_checksum_list};
use registry_catalogue::layout::{download_path, versions_path};
use registry_catalogue::release_name::{ReleasePatterns, filter_release_artefacts};
use registry_catalogue::signing_key::PgpSigningKey;
use std::fmt;

/// A document that differs from its published version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    /// Object path of the document.
    pub path: String,
    /// Rendered JSON content.
    pub content: String,
}

/// Counts of documents examined by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    /// Providers found under the prefix.
    pub providers: usize,
    /// Binary archives found under the prefix.
    pub binaries: usize,
    /// Documents that were (or, in a dry run, would be) written.
    pub written: usize,
    /// Documents already up to date.
    pub unchanged: usize,
}

impl fmt::Display for PublishSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} provider(s), {} binary(ies): {} document(s) written, {} up to date",
            self.providers, self.binaries, self.written, self.unchanged
        )
    }
}

/// The outcome of comparing a run's documents with the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishPlan {
    /// Documents to write, download documents first.
    pub writes: Vec<PendingWrite>,
    /// Counts for reporting.
    pub summary: PublishSummary,
}

impl PublishPlan {
    /// Write every pending document.
    ///
    /// # Errors
    ///
    /// Returns the store's error for the first failed write.
    pub fn apply(&self, store: &dyn ObjectStore) -> Result<()> {
        for write in &self.writes {
            info!("writing {}", write.path);
            store.write(&write.path, &write.content)?;
        }
        Ok(())
    }

    fn record(&mut self, pending: Option<PendingWrite>) {
        match pending {
            Some(write) => {
                self.summary.written += 1;
                self.writes.push(write);
            }
            None => self.summary.unchanged += 1,
        }
    }
}

/// List release artefacts under `prefix`, dropping everything else.
///
/// # Errors
///
/// Returns [`PublisherError::NoReleaseFiles`] if nothing under the prefix
/// looks like a release artefact.
pub fn list_release_files(
    store: &dyn ObjectStore,
    patterns: &ReleasePatterns,
    prefix: &str,
) -> Result<Vec<String>> {
    let files = filter_release_artefacts(patterns, store.list(prefix)?);
    if files.is_empty() {
        return Err(PublisherError::NoReleaseFiles {
            store: store.describe(),
            prefix: prefix.to_owned(),
        });
    }
    Ok(files)
}

/// Read and combine every checksum list among `files`.
///
/// A list that disappeared after listing is skipped with a warning.
///
/// # Errors
///
/// Returns a store read error or a checksum list parse error.
pub fn load_checksums(store: &dyn ObjectStore, files: &[String]) -> Result<ChecksumMap> {
    let mut checksums = ChecksumMap::new();
    for name in files.iter().filter(|name| is_checksum_list(name)) {
        match store.read(name)? {
            Some(content) => parse_checksum_list(name, &content, &mut checksums)?,
            None => warn!("{name} no longer exists; skipping"),
        }
    }
    Ok(checksums)
}

/// Compute every document of the run and compare it with the store.
///
/// # Errors
///
/// Returns any listing, reading, parsing, or catalogue error. Nothing is
/// written.
pub fn plan(
    store: &dyn ObjectStore,
    config: &PublishConfig,
    signing_key: &PgpSigningKey,
) -> Result<PublishPlan> {
    let patterns = ReleasePatterns::terraform()?;
    let files = list_release_files(store, &patterns, &config.prefix)?;
    let checksums = load_checksums(store, &files)?;
    let extractor = BinaryExtractor::new(
        patterns,
        &config.base_url,
        checksums,
        config.protocols.clone(),
    );

    let binaries = build(&extractor, &files, signing_key)?;
    let providers = group_by_provider(&binaries)?;

    let mut result = PublishPlan {
        writes: Vec::new(),
        summary: PublishSummary {
            providers: providers.len(),
            binaries: binaries.len(),
            ..PublishSummary::default()
        },
    };

    for meta in &binaries {
        result.record(plan_download_document(store, &config.namespace, meta)?);
    }
    for (type_name, discovered) in &providers {
        result.record(plan_versions_document(
            store,
            &config.namespace,
            type_name,
            discovered,
        )?);
    }
    Ok(result)
}

fn plan_download_document(
    store: &dyn ObjectStore,
    namespace: &str,
    meta: &BinaryMetadata,
) -> Result<Option<PendingWrite>> {
    let path = download_path(namespace, &meta.type_name, &meta.version, &meta.os, &meta.arch);
    let existing = read_json::<BinaryMetadata>(store, &path)?;
    if existing.is_some_and(|published| published.is_equivalent(meta)) {
        info!("{path} is up-to-date");
        return Ok(None);
    }
    let content = render_json(&path, meta)?;
    Ok(Some(PendingWrite { path, content }))
}

fn plan_versions_document(
    store: &dyn ObjectStore,
    namespace: &str,
    type_name: &str,
    discovered: &ProviderVersions,
) -> Result<Option<PendingWrite>> {
    let path = versions_path(namespace, type_name);
    let published = read_json::<ProviderVersions>(store, &path)?.unwrap_or_default();

    let mut merged = published.clone();
    merged.merge(discovered)?;
    if merged == published {
        info!("{path} already up-to-date");
        return Ok(None);
    }
    let content = render_json(&path, &merged)?;
    Ok(Some(PendingWrite { path, content }))
}

/// Run a complete publish: plan, then write unless this is a dry run.
///
/// # Errors
///
/// Returns any planning error, or the first write error.
pub fn publish(
    store: &dyn ObjectStore,
    config: &PublishConfig,
    signing_key: &PgpSigningKey,
) -> Result<PublishSummary> {
    let planned = plan(store, config, signing_key)?;
    if config.dry_run {
        for write in &planned.writes {
            info!("would write {}", write.path);
        }
    } else {
        planned.apply(store)?;
    }
    Ok(planned.summary)
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
