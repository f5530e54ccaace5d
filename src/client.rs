//! Shared HTTP core used by every service client.

use crate::error::{LookupError, Result};
use crate::retry::{with_retry, RetryPolicy};
use crate::service::Service;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// How a request is authenticated.
#[derive(Clone)]
pub enum Auth {
    /// No credentials (deps.dev).
    None,
    /// `Authorization: Bearer <key>` (Context7).
    Bearer(String),
    /// `x-api-key: <key>` (Exa).
    ApiKey(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bearer(_) => write!(f, "Bearer(****)"),
            Self::ApiKey(_) => write!(f, "ApiKey(****)"),
        }
    }
}

/// A successful response body together with its declared content type.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: String,
    pub content_type: Option<String>,
}

impl RawResponse {
    /// Whether the server labelled the body as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Async client core: base URL, credentials, timeout and retry policy for one service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: Client,
    pub(crate) service: Service,
    pub(crate) base_url: String,
    pub(crate) auth: Auth,
    pub(crate) retry: RetryPolicy,
}

impl ApiClient {
    /// Create a client for `service` using its default base URL and timeout.
    pub fn new(service: Service, auth: Auth) -> Result<Self> {
        Ok(Self {
            http: build_http(service.default_timeout())?,
            service,
            base_url: service.default_base_url().to_string(),
            auth,
            retry: RetryPolicy::none(),
        })
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_http(timeout)?;
        Ok(self)
    }

    /// Override the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Apply the base URL override from the service's environment variable, if set.
    pub(crate) fn with_env_base_url(self) -> Self {
        match std::env::var(self.service.base_url_var()) {
            Ok(url) if !url.is_empty() => self.with_base_url(url),
            _ => self,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each segment as a whole.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Parse(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make an authenticated GET request.
    pub(crate) async fn get(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<RawResponse> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);
        self.send(|| self.authorize(self.http.get(url.clone()).query(params)))
            .await
    }

    /// Make an authenticated POST request with a JSON body.
    pub(crate) async fn post_json(
        &self,
        segments: &[&str],
        body: &serde_json::Value,
    ) -> Result<RawResponse> {
        let url = self.endpoint(segments)?;
        tracing::debug!("POST {}", url);
        self.send(|| self.authorize(self.http.post(url.clone()).json(body)))
            .await
    }

    async fn send<F>(&self, request: F) -> Result<RawResponse>
    where
        F: Fn() -> RequestBuilder,
    {
        let request = &request;
        with_retry(self.retry, || async move {
            let response = request().send().await?;
            handle_response(self.service, response).await
        })
        .await
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::None => builder,
            Auth::Bearer(key) => builder.bearer_auth(key),
            Auth::ApiKey(key) => builder.header("x-api-key", key),
        }
    }
}

fn build_http(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Read the service's API key from its environment variable, treating an empty value as unset.
pub(crate) fn api_key_from_env(service: Service) -> Result<String> {
    let var = service
        .api_key_var()
        .ok_or_else(|| LookupError::Parse(format!("{} does not take an API key", service)))?;
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(LookupError::MissingApiKey(var)),
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(service: Service, response: Response) -> Result<RawResponse> {
    let status = response.status().as_u16();
    let retry_after = parse_retry_after(&response);

    match status {
        202 if service.accepted_is_pending() => Err(LookupError::NotFinalized { retry_after }),
        200..=299 => {
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let body = response.text().await?;
            Ok(RawResponse { body, content_type })
        }
        301 => {
            let body = response.text().await.unwrap_or_default();
            let redirect = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["redirectUrl"].as_str().map(String::from));
            Err(LookupError::Moved { redirect })
        }
        429 => Err(LookupError::RateLimited {
            message: service.describe_status(status),
            retry_after,
        }),
        _ => {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{} returned HTTP {}: {}", service, status, body);
            Err(LookupError::Api {
                status,
                message: service.describe_status(status),
                retry_after,
            })
        }
    }
}

fn parse_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
