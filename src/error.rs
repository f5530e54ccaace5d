//! Error types for the API clients.

use std::time::Duration;

/// Errors that can occur when talking to Context7, Exa or deps.dev.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP request failed before a status came back (DNS, connect, timeout).
    #[error("Network error - {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        retry_after: Option<Duration>,
    },

    /// Rate limited (HTTP 429).
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after: Option<Duration>,
    },

    /// Context7 accepted the request but the library is still being processed (HTTP 202).
    #[error("Library not finalized. Try again later.")]
    NotFinalized { retry_after: Option<Duration> },

    /// Context7 library moved (HTTP 301).
    #[error("{}", moved_message(.redirect))]
    Moved { redirect: Option<String> },

    /// Required API key variable is unset or empty.
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    /// Package ecosystem not known to deps.dev.
    #[error("Unknown system '{0}'")]
    UnknownSystem(String),

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Bad base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// HTTP status behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::NotFinalized { .. } => Some(202),
            Self::Moved { .. } => Some(301),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-requested wait before retrying (`Retry-After`).
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api { retry_after, .. }
            | Self::RateLimited { retry_after, .. }
            | Self::NotFinalized { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Whether the request may succeed if sent again after a backoff.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotFinalized { .. } | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => matches!(status, 500 | 503),
            _ => false,
        }
    }
}

fn moved_message(redirect: &Option<String>) -> String {
    match redirect {
        Some(to) => format!("Library moved to {}", to),
        None => "Library redirected. Check response for new ID.".to_string(),
    }
}

/// Convenience alias for Results using [`LookupError`].
pub type Result<T> = std::result::Result<T, LookupError>;
