//! Per-service constants and status message tables.

use std::time::Duration;

/// The external APIs this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Context7,
    Exa,
    DepsDev,
}

impl Service {
    /// Default API root.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Context7 => "https://context7.com/api/v2",
            Self::Exa => "https://api.exa.ai",
            Self::DepsDev => "https://api.deps.dev/v3",
        }
    }

    /// Environment variable that overrides the API root.
    pub fn base_url_var(&self) -> &'static str {
        match self {
            Self::Context7 => "CONTEXT7_BASE_URL",
            Self::Exa => "EXA_BASE_URL",
            Self::DepsDev => "DEPS_DEV_BASE_URL",
        }
    }

    /// Environment variable holding the API key, for services that need one.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            Self::Context7 => Some("CONTEXT7_API_KEY"),
            Self::Exa => Some("EXA_API_KEY"),
            Self::DepsDev => None,
        }
    }

    /// Per-request socket timeout.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Context7 | Self::DepsDev => Duration::from_secs(30),
            Self::Exa => Duration::from_secs(60),
        }
    }

    /// Context7 signals "still indexing" with 202 Accepted.
    pub(crate) fn accepted_is_pending(&self) -> bool {
        matches!(self, Self::Context7)
    }

    /// Fixed human-readable message for a status code, if the service has one.
    pub fn status_message(&self, status: u16) -> Option<&'static str> {
        let message = match (self, status) {
            (Self::Context7, 202) => "Library not finalized. Try again later.",
            (Self::Context7, 400) => "Bad request. Check parameters.",
            (Self::Context7, 401) => {
                "Invalid API key. Verify CONTEXT7_API_KEY is correct (should start with ctx7sk)."
            }
            (Self::Context7, 403) => "Access denied.",
            (Self::Context7, 404) => {
                "Library not found. Use 'search' to find the correct library ID."
            }
            (Self::Context7, 422) => "Library too large or has no code snippets.",
            (Self::Context7, 429) => "Rate limit exceeded. Wait before retrying.",
            (Self::Context7, 500) => "Server error. Try again later.",
            (Self::Context7, 503) => "Service unavailable. Try again later.",

            (Self::Exa, 400) => "Bad request. Check query parameters.",
            (Self::Exa, 401) => "Invalid API key. Verify EXA_API_KEY is correct.",
            (Self::Exa, 429) => "Rate limit exceeded.",
            (Self::Exa, 500) => "Server error. Try again later.",

            (Self::DepsDev, 400) => "Bad request. Check package name and system.",
            (Self::DepsDev, 404) => "Package not found. Check spelling and ecosystem.",
            (Self::DepsDev, 429) => "Rate limit exceeded. Wait before retrying.",
            (Self::DepsDev, 500) => "Server error. Try again later.",
            (Self::DepsDev, 503) => "Service unavailable. Try again later.",

            _ => return None,
        };
        Some(message)
    }

    /// Message for a status: the table entry, or `HTTP <code>: <reason>`.
    pub fn describe_status(&self, status: u16) -> String {
        match self.status_message(status) {
            Some(message) => message.to_string(),
            None => generic_status_message(status),
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Context7 => write!(f, "Context7"),
            Self::Exa => write!(f, "Exa"),
            Self::DepsDev => write!(f, "deps.dev"),
        }
    }
}

/// `HTTP <code>: <reason phrase>`, as used for codes with no table entry.
pub fn generic_status_message(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    format!("HTTP {}: {}", status, reason)
}
