//! Object storage for release artefacts and published documents.
//!
//! Objects are addressed by `/`-separated names relative to the store root,
//! the same names that appear in download URLs. [`DirectoryStore`] keeps
//! them as files under a local directory that mirrors the website.

use crate::error::{PublisherError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;

/// Read and write access to named objects.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStore {
    /// List every object whose name starts with `prefix`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Read an object, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the object exists but cannot be read.
    fn read(&self, name: &str) -> Result<Option<String>>;

    /// Create or replace an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be written.
    fn write(&self, name: &str, content: &str) -> Result<()>;

    /// Describe the store for messages.
    fn describe(&self) -> String;
}

/// Normalise a listing prefix to `<dir>/`, or the empty string for the root.
///
/// # Examples
///
/// ```
/// use registry_publisher::store::listing_prefix;
///
/// assert_eq!(listing_prefix("/binaries/"), "binaries/");
/// assert_eq!(listing_prefix("binaries"), "binaries/");
/// assert_eq!(listing_prefix("/"), "");
/// ```
#[must_use]
pub fn listing_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

/// An [`ObjectStore`] backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: Utf8PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Return the root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name.trim_start_matches('/'))
    }

    fn object_name(&self, path: &Utf8Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = relative.components().map(|c| c.as_str()).collect();
        Some(parts.join("/"))
    }

    fn walk(&self, dir: &Utf8Path, names: &mut Vec<String>) -> Result<()> {
        let entries = match dir.read_dir_utf8() {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(PublisherError::ListObjects {
                    path: dir.to_owned(),
                    source,
                });
            }
        };

        for entry in entries {
            let entry = entry.map_err(|source| PublisherError::ListObjects {
                path: dir.to_owned(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| PublisherError::ListObjects {
                path: entry.path().to_owned(),
                source,
            })?;
            if file_type.is_dir() {
                self.walk(entry.path(), names)?;
            } else if let Some(name) = self.object_name(entry.path()) {
                names.push(name);
            }
        }
        Ok(())
    }
}

impl ObjectStore for DirectoryStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = listing_prefix(prefix);
        let mut names = Vec::new();
        self.walk(&self.path_of(&prefix), &mut names)?;
        names.sort();
        debug!("listed {} objects under {}{prefix}", names.len(), self.root);
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_of(name)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PublisherError::ReadObject {
                path: name.to_owned(),
                source,
            }),
        }
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path_of(name);
        let to_write_error = |source| PublisherError::WriteObject {
            path: name.to_owned(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(to_write_error)?;
        }
        std::fs::write(&path, content).map_err(to_write_error)
    }

    fn describe(&self) -> String {
        self.root.to_string()
    }
}

/// Read and parse a JSON document, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns [`PublisherError::ParseDocument`] if the document is not valid
/// JSON of type `T`, or the store's read error.
pub fn read_json<T: DeserializeOwned>(store: &dyn ObjectStore, name: &str) -> Result<Option<T>> {
    let Some(content) = store.read(name)? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| PublisherError::ParseDocument {
            path: name.to_owned(),
            source,
        })
}

/// Serialise `document` as two-space indented JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`PublisherError::SerializeDocument`] if serialisation fails.
pub fn render_json<T: Serialize>(name: &str, document: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(document).map_err(|source| {
        PublisherError::SerializeDocument {
            path: name.to_owned(),
            source,
        }
    })?;
    json.push('\n');
    Ok(json)
}
