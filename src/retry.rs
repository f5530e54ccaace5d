//! Fixed exponential backoff for transient API failures.

use crate::error::{LookupError, Result};
use std::future::Future;
use std::time::Duration;

/// How many times to send a request and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failure; doubled for each later one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Three attempts, waiting 1s then 2s.
    pub fn standard() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }

    /// Send once, never retry.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Backoff after the given (0-based) failed attempt, unless the server asked for a wait.
    pub fn delay_for(&self, attempt: u32, err: &LookupError) -> Duration {
        err.retry_after()
            .unwrap_or_else(|| self.base_delay.saturating_mul(2u32.saturating_pow(attempt)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Run `operation` until it succeeds, fails permanently, or runs out of attempts.
///
/// Only errors for which [`LookupError::is_retryable`] holds are retried; the
/// last error is returned once the attempts are spent.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                let wait = policy.delay_for(attempt, &err);
                tracing::warn!(
                    "Retrying in {}s... (attempt {})",
                    wait.as_secs_f64(),
                    attempt + 1
                );
                tracing::debug!("retryable failure: {}", err);
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
