//! deps.dev package metadata API.

use crate::client::{ApiClient, Auth};
use crate::error::{LookupError, Result};
use crate::retry::RetryPolicy;
use crate::service::Service;
use crate::types::{PackageInfo, VersionDetail};
use std::str::FromStr;
use std::time::Duration;

/// A package ecosystem known to deps.dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    Npm,
    Pypi,
    Go,
    Cargo,
    Maven,
    Nuget,
    Rubygems,
}

impl System {
    pub const ALL: [System; 7] = [
        System::Npm,
        System::Pypi,
        System::Go,
        System::Cargo,
        System::Maven,
        System::Nuget,
        System::Rubygems,
    ];

    /// Spelling used in API paths (`NPM`, `PYPI`, ...).
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Npm => "NPM",
            Self::Pypi => "PYPI",
            Self::Go => "GO",
            Self::Cargo => "CARGO",
            Self::Maven => "MAVEN",
            Self::Nuget => "NUGET",
            Self::Rubygems => "RUBYGEMS",
        }
    }

    /// Spelling used on the command line (`npm`, `pypi`, ...).
    pub fn as_cli_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pypi => "pypi",
            Self::Go => "go",
            Self::Cargo => "cargo",
            Self::Maven => "maven",
            Self::Nuget => "nuget",
            Self::Rubygems => "rubygems",
        }
    }

    /// Comma-separated list of the command-line names.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_cli_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for System {
    type Err = LookupError;

    /// Accepts the lower-case key (`npm`) or the API name (`NPM`).
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|sys| s.to_lowercase() == sys.as_cli_str() || s.to_uppercase() == sys.as_api_str())
            .ok_or_else(|| LookupError::UnknownSystem(s.to_string()))
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_api_str())
    }
}

/// Async client for the deps.dev API. No credentials are needed.
#[derive(Debug, Clone)]
pub struct DepsDevClient {
    pub(crate) api: ApiClient,
}

impl DepsDevClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(Service::DepsDev, Auth::None)?,
        })
    }

    /// Create a client honouring `DEPS_DEV_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let mut client = Self::new()?;
        client.api = client.api.with_env_base_url();
        Ok(client)
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(url);
        self
    }

    /// Override the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.api = self.api.with_retry_policy(policy);
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.api = self.api.with_timeout(timeout)?;
        Ok(self)
    }

    /// Raw package document: package key plus every known version.
    pub async fn package_json(&self, system: System, name: &str) -> Result<serde_json::Value> {
        let segments = ["systems", system.as_api_str(), "packages", name];
        self.api.get(&segments, &[]).await?.json()
    }

    /// Package document parsed into [`PackageInfo`].
    pub async fn package(&self, system: System, name: &str) -> Result<PackageInfo> {
        let raw = self.package_json(system, name).await?;
        PackageInfo::from_value(raw)
    }

    /// Raw document for a single version.
    pub async fn version_json(
        &self,
        system: System,
        name: &str,
        version: &str,
    ) -> Result<serde_json::Value> {
        let segments = [
            "systems",
            system.as_api_str(),
            "packages",
            name,
            "versions",
            version,
        ];
        self.api.get(&segments, &[]).await?.json()
    }

    /// Version document parsed into [`VersionDetail`].
    pub async fn version(&self, system: System, name: &str, version: &str) -> Result<VersionDetail> {
        let raw = self.version_json(system, name, version).await?;
        VersionDetail::from_value(raw)
    }
}
