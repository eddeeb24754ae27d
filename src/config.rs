//! Client configuration.
//!
//! [`ClientConfig`] collects everything the HTTP session needs: timeout,
//! user agent, URL scheme, the retry policy and the paging options. It is
//! plain data and deserialises from JSON with every field optional.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pager::PagingOptions;
use crate::retry::RetryPolicy;

/// Configuration for an [`AmpleClient`](crate::client::AmpleClient).
///
/// # Examples
///
/// ```
/// use cerl::config::ClientConfig;
///
/// // Defaults: https, 30 s timeout, 3 retries, pages of 100
/// let config = ClientConfig::default();
/// assert_eq!(config.scheme, "https");
///
/// // Partial JSON fills the rest from defaults
/// let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
/// assert_eq!(config.timeout().as_secs(), 5);
/// assert_eq!(config.paging.page_size, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// URL scheme prepended to endpoint hosts
    pub scheme: String,
    /// Retry behaviour for failed requests
    pub retry: RetryPolicy,
    /// Page size, result window and stride for search paging
    pub paging: PagingOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout_secs: 30,
            user_agent: format!("cerl/{}", env!("CARGO_PKG_VERSION")),
            scheme: "https".to_string(),
            retry: RetryPolicy::default(),
            paging: PagingOptions::default(),
        }
    }
}

impl ClientConfig {
    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
