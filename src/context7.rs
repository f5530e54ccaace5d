//! Context7 library documentation API.
//!
//! Covers: library search and documentation retrieval.

use crate::client::{api_key_from_env, ApiClient, Auth};
use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::service::Service;
use std::time::Duration;

/// Prefix every Context7 secret key carries.
pub const KEY_PREFIX: &str = "ctx7sk";

/// Format requested from the docs endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DocsFormat {
    #[default]
    Txt,
    Json,
}

impl DocsFormat {
    /// Value for the `type` query parameter.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }
}

/// Documentation as returned by Context7: JSON when the server says so, plain text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Docs {
    Text(String),
    Json(serde_json::Value),
}

impl Docs {
    /// Render for printing: text as-is, JSON pretty-printed.
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Json(value) => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// Async client for the Context7 API.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> devlookup::error::Result<()> {
/// let client = devlookup::Context7Client::from_env()?;
/// let libraries = client.search_libraries("react", "hooks").await?;
/// println!("{}", serde_json::to_string_pretty(&libraries)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Context7Client {
    pub(crate) api: ApiClient,
}

impl Context7Client {
    /// Create a new client with the given API key.
    ///
    /// Keys that don't look like Context7 secret keys are accepted with a warning.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if !has_key_prefix(&api_key) {
            tracing::warn!("API key should start with '{}'", KEY_PREFIX);
        }
        let api = ApiClient::new(Service::Context7, Auth::Bearer(api_key))?
            .with_retry_policy(RetryPolicy::standard());
        Ok(Self { api })
    }

    /// Create a client for an explicit key, honouring `CONTEXT7_BASE_URL`.
    pub fn from_key(api_key: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(api_key)?;
        client.api = client.api.with_env_base_url();
        Ok(client)
    }

    /// Create a client from `CONTEXT7_API_KEY`, honouring `CONTEXT7_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_key(api_key_from_env(Service::Context7)?)
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

    /// Search for libraries by name, ranked against `query`.
    ///
    /// A non-JSON body comes back as a JSON string.
    pub async fn search_libraries(&self, library: &str, query: &str) -> Result<serde_json::Value> {
        let params = [("libraryName", library), ("query", query)];
        let response = self.api.get(&["libs", "search"], &params).await?;

        if response.is_json() {
            response.json()
        } else {
            Ok(serde_json::Value::String(response.body))
        }
    }

    /// Fetch documentation for a library ID such as `/facebook/react`.
    pub async fn docs(&self, library_id: &str, query: &str, format: DocsFormat) -> Result<Docs> {
        let params = [
            ("libraryId", library_id),
            ("query", query),
            ("type", format.as_api_str()),
        ];
        let response = self.api.get(&["context"], &params).await?;

        if response.is_json() {
            Ok(Docs::Json(response.json()?))
        } else {
            Ok(Docs::Text(response.body))
        }
    }
}

fn has_key_prefix(key: &str) -> bool {
    key.starts_with(KEY_PREFIX)
}
