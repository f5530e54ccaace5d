//! Typed views over Exa and deps.dev responses.
//!
//! JSON output always prints the raw response; these types only back the
//! text reports and the latest-version lookup, so every field is lenient.

use crate::error::{LookupError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn from_value<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| LookupError::Parse(format!("Invalid {} response: {}", what, e)))
}

// ===== Exa =====

/// One hit from Exa search or contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExaResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub published_date: Option<String>,
    pub text: Option<String>,
}

/// The `results` array of a search or contents response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsPage {
    pub results: Vec<ExaResult>,
}

impl ResultsPage {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        from_value(value, "Exa results")
    }
}

/// Response from Exa's code context endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeContext {
    pub response: String,
    pub results_count: u64,
    pub output_tokens: u64,
}

impl CodeContext {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        from_value(value, "Exa code context")
    }
}

// ===== deps.dev =====

/// Identifies a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageKey {
    pub system: Option<String>,
    pub name: Option<String>,
}

/// Identifies one version of a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionKey {
    pub system: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

/// A version as listed in a package document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionSummary {
    pub version_key: VersionKey,
    pub published_at: Option<String>,
    pub is_default: bool,
    pub is_deprecated: bool,
}

/// Package document: its key and every known version, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageInfo {
    pub package_key: PackageKey,
    pub versions: Vec<VersionSummary>,
}

impl PackageInfo {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        from_value(value, "package")
    }

    /// The version deps.dev marks as default (usually the latest release).
    pub fn default_version(&self) -> Option<&VersionSummary> {
        self.versions.iter().find(|v| v.is_default)
    }

    /// Up to `n` most recently listed versions, in listing order.
    pub fn recent_versions(&self, n: usize) -> &[VersionSummary] {
        let start = self.versions.len().saturating_sub(n);
        &self.versions[start..]
    }
}

/// Details of a single version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionDetail {
    pub version_key: VersionKey,
    pub published_at: Option<String>,
    pub is_default: bool,
    pub licenses: Vec<String>,
    pub advisory_keys: Vec<serde_json::Value>,
}

impl VersionDetail {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        from_value(value, "version")
    }
}
