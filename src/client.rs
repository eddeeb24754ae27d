//! The record service client.
//!
//! [`AmpleClient`] owns a [`Transport`] (normally a [`UreqTransport`] with
//! its connection pool) plus the scheme and paging options, and exposes every
//! operation against an [`Endpoint`] passed in by the caller.
//!
//! # Examples
//!
//! ```no_run
//! use cerl::{AmpleClient, ClientConfig, Endpoint};
//!
//! # fn main() -> cerl::Result<()> {
//! let client = AmpleClient::new(&ClientConfig::default());
//!
//! let result = client.query(&Endpoint::THESAURUS, "Manutius")?;
//! println!("{} hits, {} rows", result.hits(), result.rows().len());
//!
//! let turtle = client.record_export(&Endpoint::THESAURUS, "cnp00400291", "rdf/ttl")?;
//! println!("{turtle}");
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::pager::{query_hits, PagingOptions, QueryPager};
use crate::query::{aggregate, QueryResult};
use crate::record::{fetch_record, fetch_record_export};
use crate::transport::{Transport, UreqTransport};

/// Client for AMPLE record services.
#[derive(Debug, Clone)]
pub struct AmpleClient<T = UreqTransport> {
    transport: T,
    scheme: String,
    paging: PagingOptions,
}

impl AmpleClient<UreqTransport> {
    /// Build a client with a `ureq` transport configured from `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        AmpleClient {
            transport: UreqTransport::new(config),
            scheme: config.scheme.clone(),
            paging: config.paging.clone(),
        }
    }
}

impl Default for AmpleClient<UreqTransport> {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl<T: Transport> AmpleClient<T> {
    /// Build a client over any transport, using `https`.
    pub fn with_transport(transport: T, paging: PagingOptions) -> Self {
        AmpleClient {
            transport,
            scheme: "https".to_string(),
            paging,
        }
    }

    /// Replace the URL scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of records matching `query`.
    ///
    /// # Errors
    ///
    /// Returns transport errors or a malformed-response error.
    pub fn query_hits(&self, endpoint: &Endpoint, query: &str) -> Result<u64> {
        query_hits(&self.transport, endpoint, &self.scheme, query)
    }

    /// A lazy pager over the results of `query`.
    pub fn pages(&self, endpoint: &Endpoint, query: &str) -> QueryPager<&T> {
        QueryPager::new(
            &self.transport,
            endpoint.clone(),
            self.scheme.as_str(),
            query,
            self.paging.clone(),
        )
    }

    /// Run `query` and collect up to 10 000 rows.
    ///
    /// # Errors
    ///
    /// Returns the first transport or response error met while paging.
    pub fn query(&self, endpoint: &Endpoint, query: &str) -> Result<QueryResult> {
        aggregate(self.pages(endpoint, query))
    }

    /// Fetch one record as JSON.
    ///
    /// # Errors
    ///
    /// Returns transport errors or a malformed-response error.
    pub fn record(&self, endpoint: &Endpoint, id: &str) -> Result<Value> {
        fetch_record(&self.transport, endpoint, &self.scheme, id)
    }

    /// Fetch one record as text in the export format named by `selector`.
    ///
    /// # Errors
    ///
    /// Returns transport errors.
    pub fn record_export(&self, endpoint: &Endpoint, id: &str, selector: &str) -> Result<String> {
        fetch_record_export(&self.transport, endpoint, &self.scheme, id, selector)
    }
}
