//! Object paths of the static registry API.
//!
//! All paths are relative to the website root and use `/` separators.

/// Root of the provider registry protocol.
pub const PROVIDERS_V1_ROOT: &str = "v1/providers";

/// Path of the service discovery document. It is published separately.
pub const DISCOVERY_DOCUMENT_PATH: &str = ".well-known/terraform.json";

/// Directory holding every document of one provider.
#[must_use]
pub fn provider_directory(namespace: &str, type_name: &str) -> String {
    format!("{PROVIDERS_V1_ROOT}/{namespace}/{type_name}")
}

/// Path of a provider's `versions` document.
///
/// # Examples
///
/// ```
/// use registry_catalogue::layout::versions_path;
///
/// assert_eq!(versions_path("acme-corp", "acme"), "v1/providers/acme-corp/acme/versions");
/// ```
#[must_use]
pub fn versions_path(namespace: &str, type_name: &str) -> String {
    format!("{}/versions", provider_directory(namespace, type_name))
}

/// Path of the download document for one binary.
#[must_use]
pub fn download_path(
    namespace: &str,
    type_name: &str,
    version: &str,
    os: &str,
    arch: &str,
) -> String {
    format!(
        "{}/{version}/download/{os}/{arch}",
        provider_directory(namespace, type_name)
    )
}
