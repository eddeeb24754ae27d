//! Bounded retry with exponential backoff.
//!
//! The service occasionally answers with rate-limit or gateway errors. Every
//! request issued by this crate is an idempotent `GET`, so the transport
//! replays it according to a [`RetryPolicy`] before giving up.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP statuses that are worth replaying.
pub const DEFAULT_RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Statuses whose `Retry-After` header is honoured.
pub const RETRY_AFTER_STATUSES: [u16; 3] = [413, 429, 503];

/// Retry behaviour for idempotent requests.
///
/// # Examples
///
/// ```
/// use cerl::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_retries, 3);
/// assert_eq!(policy.backoff(1), Duration::from_secs(1));
/// assert_eq!(policy.backoff(3), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt
    pub max_retries: u32,
    /// Base delay in milliseconds; doubled for every further retry
    pub backoff_factor_ms: u64,
    /// Response statuses that trigger a retry
    pub retry_statuses: Vec<u16>,
    /// Upper bound for any single delay, computed or server-requested
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            backoff_factor_ms: 1000,
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            max_backoff_ms: 120_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        RetryPolicy {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether a response with `status` should be replayed.
    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Whether another attempt is allowed after `retries_done` retries.
    #[must_use]
    pub fn allows_retry(&self, retries_done: u32) -> bool {
        retries_done < self.max_retries
    }

    /// Delay before retry number `retry` (1-based): `factor * 2^(retry - 1)`.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        let millis = self.backoff_factor_ms.saturating_mul(1 << exponent);
        Duration::from_millis(millis.min(self.max_backoff_ms))
    }

    /// Delay before retry number `retry` after a response with `status`.
    ///
    /// A `Retry-After` value sent with 413, 429 or 503 replaces the computed
    /// backoff; both are capped at `max_backoff_ms`.
    #[must_use]
    pub fn delay_for(
        &self,
        retry: u32,
        status: Option<u16>,
        retry_after: Option<Duration>,
    ) -> Duration {
        let cap = Duration::from_millis(self.max_backoff_ms);
        match (status, retry_after) {
            (Some(status), Some(requested)) if RETRY_AFTER_STATUSES.contains(&status) => {
                requested.min(cap)
            },
            _ => self.backoff(retry),
        }
    }
}

/// Parse a `Retry-After` header given in delta-seconds.
///
/// HTTP-date values are not understood and yield `None`, which falls back to
/// the computed backoff.
#[must_use]
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_statuses() {
        let policy = RetryPolicy::default();
        for status in [429, 500, 502, 503, 504] {
            assert!(policy.is_retryable_status(status));
        }
        assert!(!policy.is_retryable_status(404));
        assert!(!policy.is_retryable_status(501));
    }

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy {
            backoff_factor_ms: 10,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(10));
        assert_eq!(policy.backoff(2), Duration::from_millis(20));
        assert_eq!(policy.backoff(3), Duration::from_millis(40));
    }

    #[test]
    fn test_allows_retry_is_bounded() {
        let policy = RetryPolicy::default();
        assert!(policy.allows_retry(0));
        assert!(policy.allows_retry(2));
        assert!(!policy.allows_retry(3));
        assert!(!RetryPolicy::none().allows_retry(0));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy {
            max_backoff_ms: 1500,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(1500));
    }

    #[test]
    fn test_retry_after_overrides_backoff_for_rate_limits() {
        let policy = RetryPolicy::default();
        let requested = Some(Duration::from_secs(7));
        assert_eq!(policy.delay_for(1, Some(429), requested), Duration::from_secs(7));
        assert_eq!(policy.delay_for(1, Some(503), requested), Duration::from_secs(7));
        assert_eq!(policy.delay_for(2, Some(502), requested), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3, Some(503), None), Duration::from_secs(4));
        assert_eq!(policy.delay_for(1, None, None), Duration::from_secs(1));
        assert_eq!(
            policy.delay_for(1, Some(429), Some(Duration::from_secs(3600))),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("0"), Some(Duration::ZERO));
        assert_eq!(parse_retry_after(" 12 "), Some(Duration::from_secs(12)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after("-1"), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max_retries": 5}"#).unwrap();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.backoff_factor_ms, 1000);
    }
}
