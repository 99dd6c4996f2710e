//! Retry policies for HTTP requests.

use crate::error::{HttpError, SdkError};
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries — used for POST/PUT/DELETE, which are not safe to replay.
    #[default]
    None,
    /// Retry on transport failures + 429/502/503/504 with exponential backoff.
    /// Default for GET requests and every page of a paged listing.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Resolve the policy into a concrete config; `None` means a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// The default config for idempotent (GET) requests.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Whether `err` is worth another attempt under this config.
    ///
    /// Auth failures, malformed bodies and statuses outside
    /// `retryable_statuses` are never retried.
    pub fn should_retry(&self, err: &SdkError) -> bool {
        match err {
            SdkError::Http(HttpError::Api { status, .. }) => {
                self.retryable_statuses.contains(status)
            }
            SdkError::Http(HttpError::Timeout) => true,
            SdkError::Http(HttpError::Connection(_)) => true,
            _ => false,
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
