//! Latest-version lookup for many packages at once.

use crate::batch::fetch_ordered;
use crate::depsdev::{DepsDevClient, System};
use crate::error::LookupError;
use crate::service::generic_status_message;
use crate::types::{PackageInfo, VersionSummary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Ecosystems accepted by the batch lookup.
pub const BATCH_SYSTEMS: [System; 6] = [
    System::Npm,
    System::Pypi,
    System::Go,
    System::Cargo,
    System::Maven,
    System::Nuget,
];

/// Per-request timeout for batch lookups.
pub const BATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Added when a package has no default version and the last listed one is used.
pub const FALLBACK_NOTE: &str = "No default version, using latest available";

/// Result of looking up one package: either a version or an error, never neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVersion {
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LatestVersion {
    /// Record for a lookup that failed.
    pub fn failed(package: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: None,
            published_at: None,
            is_deprecated: None,
            note: None,
            error: Some(error.into()),
        }
    }

    fn found(package: &str, summary: &VersionSummary, note: Option<&str>) -> Self {
        match summary.version_key.version.as_deref() {
            Some(version) => Self {
                package: package.to_string(),
                version: Some(version.to_string()),
                published_at: Some(summary.published_at.clone().unwrap_or_default()),
                is_deprecated: Some(summary.is_deprecated),
                note: note.map(String::from),
                error: None,
            },
            None => Self::failed(package, "Version key missing from response"),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Whole batch result, as printed by `get-versions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionReport {
    pub system: String,
    pub packages: Vec<LatestVersion>,
}

/// Pick the version to report for a package: the default one, else the last listed.
pub fn pick_latest(package: &str, info: &PackageInfo) -> LatestVersion {
    if let Some(default) = info.default_version() {
        return LatestVersion::found(package, default, None);
    }
    match info.versions.last() {
        Some(last) => LatestVersion::found(package, last, Some(FALLBACK_NOTE)),
        None => LatestVersion::failed(package, "No versions found"),
    }
}

/// Short per-package error text.
pub fn describe_failure(err: &LookupError) -> String {
    match err {
        LookupError::Http(e) if e.is_decode() => "Invalid JSON response".to_string(),
        LookupError::Http(e) => match e.status() {
            Some(status) => generic_status_message(status.as_u16()),
            None => format!("Network error: {}", e),
        },
        LookupError::Json(_) | LookupError::Parse(_) => "Invalid JSON response".to_string(),
        other => match other.status() {
            Some(status) => generic_status_message(status),
            None => other.to_string(),
        },
    }
}

/// CLI spellings of [`BATCH_SYSTEMS`], as listed in error output.
pub fn batch_system_names() -> Vec<&'static str> {
    BATCH_SYSTEMS.iter().map(|s| s.as_cli_str()).collect()
}

/// Parse an ecosystem name for the batch lookup. Systems outside [`BATCH_SYSTEMS`] are rejected.
pub fn parse_batch_system(name: &str) -> Option<System> {
    name.parse::<System>()
        .ok()
        .filter(|system| BATCH_SYSTEMS.contains(system))
}

/// JSON printed when `get-versions` is called without a system and packages.
pub fn usage_error() -> serde_json::Value {
    json!({
        "error": "Usage: get-versions <system> <package1> [package2] ...",
        "systems": batch_system_names(),
    })
}

/// JSON printed for an ecosystem the batch lookup does not accept.
pub fn invalid_system_error(name: &str) -> serde_json::Value {
    json!({
        "error": format!("Invalid system: {}", name),
        "valid_systems": batch_system_names(),
    })
}

/// Look up the latest version of every package, `width` at a time, in input order.
pub async fn latest_versions(
    client: &DepsDevClient,
    system: System,
    packages: &[String],
    width: usize,
) -> Vec<LatestVersion> {
    tracing::debug!("looking up {} {} packages", packages.len(), system);
    fetch_ordered(packages, width, |package| async move {
        match client.package(system, package).await {
            Ok(info) => pick_latest(package, &info),
            Err(e) => {
                tracing::debug!("{}: {}", package, e);
                LatestVersion::failed(package.as_str(), describe_failure(&e))
            }
        }
    })
    .await
}
