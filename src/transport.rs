//! HTTP transport used by the client.
//!
//! The rest of the crate needs exactly one capability from the network:
//! `GET(url) -> (status, body)`. The [`Transport`] trait captures it, so tests
//! and callers can substitute their own implementation. [`UreqTransport`] is
//! the real one, a blocking `ureq` agent that replays retryable failures
//! according to a [`RetryPolicy`].

use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{CerlError, Result};
use crate::retry::{parse_retry_after, RetryPolicy};

/// A successful HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code (always 2xx when returned from a [`Transport`])
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CerlError::MalformedResponse`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body)
            .map_err(|e| CerlError::malformed(format!("response body is not JSON: {e}")))
    }

    /// Consume the response and return the body text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.body
    }
}

/// Capability to issue `GET` requests.
///
/// Implementations return `Ok` only for 2xx responses. Non-success statuses
/// map to [`CerlError::Status`] and network failures to
/// [`CerlError::Transport`].
pub trait Transport {
    /// Issue a `GET` request for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error for network failures and non-2xx responses.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        (**self).get(url)
    }
}

/// Blocking transport backed by a shared `ureq` agent.
///
/// The agent keeps a connection pool, so one transport should be reused for
/// all requests.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    retry: RetryPolicy,
}

impl UreqTransport {
    /// Build a transport from a client configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build();

        UreqTransport {
            agent,
            retry: config.retry.clone(),
        }
    }

    /// The retry policy in use.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    fn attempt(&self, url: &str) -> Attempt {
        match self.agent.get(url).call() {
            Ok(response) => {
                let status = response.status();
                match response.into_string() {
                    Ok(body) => Attempt::Done(HttpResponse { status, body }),
                    Err(e) => Attempt::Body(format!("failed to read body: {e}")),
                }
            },
            Err(ureq::Error::Status(status, response)) => {
                let retry_after = response.header("Retry-After").and_then(parse_retry_after);
                Attempt::Status(status, retry_after)
            },
            Err(ureq::Error::Transport(transport)) => Attempt::Network(transport.to_string()),
        }
    }
}

enum Attempt {
    Done(HttpResponse),
    /// Non-success status, with the server's `Retry-After` if it sent one
    Status(u16, Option<Duration>),
    Network(String),
    /// The body of a success response could not be read (e.g. over 10 MB)
    Body(String),
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let mut retries = 0;
        loop {
            debug!(url, attempt = retries + 1, "GET");
            let (error, status, retry_after) = match self.attempt(url) {
                Attempt::Done(response) => return Ok(response),
                Attempt::Status(status, retry_after) if self.retry.is_retryable_status(status) => {
                    let error = CerlError::Status {
                        url: url.to_string(),
                        status,
                    };
                    (error, Some(status), retry_after)
                },
                Attempt::Status(status, _) => {
                    return Err(CerlError::Status {
                        url: url.to_string(),
                        status,
                    })
                },
                Attempt::Body(message) => {
                    return Err(CerlError::Transport {
                        url: url.to_string(),
                        message,
                    })
                },
                Attempt::Network(message) => {
                    let error = CerlError::Transport {
                        url: url.to_string(),
                        message,
                    };
                    (error, None, None)
                },
            };

            if !self.retry.allows_retry(retries) {
                return Err(error);
            }
            retries += 1;
            let delay = self.retry.delay_for(retries, status, retry_after);
            warn!(url, %error, retry = retries, ?delay, "retrying request");
            thread::sleep(delay);
        }
    }
}
