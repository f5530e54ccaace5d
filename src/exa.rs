//! Exa web search and content extraction API.
//!
//! Covers: search, contents, and code context.

use crate::client::{api_key_from_env, ApiClient, Auth};
use crate::error::{LookupError, Result};
use crate::retry::RetryPolicy;
use crate::service::Service;
use serde::{Serialize, Serializer};
use std::str::FromStr;
use std::time::Duration;

/// Search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SearchType {
    Fast,
    #[default]
    Auto,
    Deep,
}

/// Live crawl mode for content extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Livecrawl {
    Never,
    Fallback,
    Preferred,
    Always,
}

/// Token limit for code context: `dynamic` or a fixed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenBudget {
    Dynamic,
    Count(u32),
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::Count(5000)
    }
}

impl FromStr for TokenBudget {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("dynamic") {
            return Ok(Self::Dynamic);
        }
        s.parse::<u32>()
            .map(Self::Count)
            .map_err(|_| LookupError::Parse(format!("invalid token limit '{}': expected 'dynamic' or a number", s)))
    }
}

impl Serialize for TokenBudget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Dynamic => serializer.serialize_str("dynamic"),
            Self::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

impl std::fmt::Display for TokenBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dynamic => write!(f, "dynamic"),
            Self::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Body of a `/search` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub num_results: u32,
    /// Include full page text.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub text: bool,
    /// Include LLM-optimized context.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub context: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_domains: Vec<String>,
    /// ISO 8601 lower bound on publication date.
    #[serde(rename = "startPublishedDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO 8601 upper bound on publication date.
    #[serde(rename = "endPublishedDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl SearchOptions {
    /// Search for `query` with the defaults: auto depth, 10 results.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_type: SearchType::default(),
            num_results: 10,
            text: false,
            context: false,
            include_domains: Vec::new(),
            exclude_domains: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ContentsRequest<'a> {
    urls: &'a [String],
    text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    livecrawl: Option<Livecrawl>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CodeRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens_num: Option<TokenBudget>,
}

/// Split a comma-separated CLI list. Items are passed through as typed.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(String::from).collect()
}

/// Async client for the Exa API.
#[derive(Debug, Clone)]
pub struct ExaClient {
    pub(crate) api: ApiClient,
}

impl ExaClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api = ApiClient::new(Service::Exa, Auth::ApiKey(api_key.into()))?;
        Ok(Self { api })
    }

    /// Create a client for an explicit key, honouring `EXA_BASE_URL`.
    pub fn from_key(api_key: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(api_key)?;
        client.api = client.api.with_env_base_url();
        Ok(client)
    }

    /// Create a client from `EXA_API_KEY`, honouring `EXA_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_key(api_key_from_env(Service::Exa)?)
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

    /// Search the web.
    pub async fn search(&self, options: &SearchOptions) -> Result<serde_json::Value> {
        let body = serde_json::to_value(options)?;
        self.api.post_json(&["search"], &body).await?.json()
    }

    /// Extract page contents for a set of URLs.
    pub async fn contents(
        &self,
        urls: &[String],
        livecrawl: Option<Livecrawl>,
    ) -> Result<serde_json::Value> {
        let body = serde_json::to_value(ContentsRequest {
            urls,
            text: true,
            livecrawl,
        })?;
        self.api.post_json(&["contents"], &body).await?.json()
    }

    /// Find code examples and programming context for a query.
    pub async fn code_context(
        &self,
        query: &str,
        tokens: Option<TokenBudget>,
    ) -> Result<serde_json::Value> {
        let body = serde_json::to_value(CodeRequest {
            query,
            tokens_num: tokens,
        })?;
        self.api.post_json(&["context"], &body).await?.json()
    }
}
