//! Validation of the protocol list advertised for every binary in a run.

use crate::error::{CatalogueError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Protocol version used when none is configured.
pub const DEFAULT_PROTOCOLS: &str = "5.0";

const PROTOCOL_PATTERN: &str = r"^[0-9]+\.[0-9]+$";

static PROTOCOL_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(PROTOCOL_PATTERN));

/// Split a comma-separated protocol list and validate each entry.
///
/// Entries are trimmed and must look like `<major>.<minor>`. Order is kept
/// as given; the catalogue sorts protocols itself.
///
/// # Errors
///
/// Returns [`CatalogueError::NoProtocols`] for an empty list and
/// [`CatalogueError::InvalidProtocol`] for the first malformed entry.
///
/// # Examples
///
/// ```
/// use registry_catalogue::protocol::parse_protocols;
///
/// assert_eq!(parse_protocols("5.0, 6.0").expect("valid"), ["5.0", "6.0"]);
/// assert!(parse_protocols("5").is_err());
/// ```
pub fn parse_protocols(list: &str) -> Result<Vec<String>> {
    let pattern = PROTOCOL_RE
        .as_ref()
        .map_err(|e| CatalogueError::InvalidProtocolPattern {
            reason: e.to_string(),
        })?;

    let protocols = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if pattern.is_match(entry) {
                Ok(entry.to_owned())
            } else {
                Err(CatalogueError::InvalidProtocol {
                    value: entry.to_owned(),
                })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    if protocols.is_empty() {
        return Err(CatalogueError::NoProtocols);
    }
    Ok(protocols)
}
