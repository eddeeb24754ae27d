#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # cerl: CERL record service client
//!
//! A blocking client for the AMPLE search API behind the CERL databases
//! (Thesaurus, ISTC, holding institutions, MEI), plus a small dot-notation
//! accessor for the untyped JSON records it returns.
//!
//! ## Quick Start
//!
//! ### Searching
//!
//! ```no_run
//! use cerl::{AmpleClient, Endpoint};
//!
//! # fn main() -> cerl::Result<()> {
//! let client = AmpleClient::default();
//! let result = client.query(&Endpoint::ISTC, "Venice AND 1495")?;
//!
//! for id in result.ids().into_iter().flatten() {
//!     println!("{id}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading record fields
//!
//! ```
//! use cerl::fields::{identifier_of, inferred_type_of, RecordType};
//! use cerl::path::by_dot;
//! use serde_json::json;
//!
//! let record = json!({
//!     "_id": "cnp00123",
//!     "data": {"nameVariants": [{"name": "Aldus"}, {"name": "Aldo"}]}
//! });
//!
//! assert_eq!(identifier_of(&record).unwrap(), "cnp00123");
//! assert_eq!(inferred_type_of(&record), RecordType::Person);
//! assert_eq!(by_dot(&record, "data.nameVariants.name").len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`client`] - [`AmpleClient`], the entry point
//! - [`endpoint`] - Service hosts and request URLs
//! - [`pager`] - Lazy paging through search results
//! - [`query`] - Aggregated search results
//! - [`record`] - Fetching single records
//! - [`export`] - Export format table
//! - [`path`] - Dot-notation access to nested records
//! - [`singleton`] - Exactly-one extraction
//! - [`fields`] - Identifier and record type helpers
//! - [`transport`] - HTTP transport trait and `ureq` implementation
//! - [`retry`] - Retry and backoff policy
//! - [`config`] - Client configuration
//! - [`error`] - Error types and result type

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod export;
pub mod fields;
pub mod pager;
pub mod path;
pub mod query;
pub mod record;
pub mod retry;
pub mod singleton;
pub mod transport;

pub use client::AmpleClient;
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{Cardinality, CerlError, Result};
pub use export::ExportFormat;
pub use fields::{identifier_of, inferred_type_of, RecordType};
pub use pager::{Page, PagingOptions, QueryPager, StridePolicy};
pub use path::{by_dot, FalsyPolicy};
pub use query::{ids_from_result, QueryResult};
pub use retry::RetryPolicy;
pub use singleton::one;
pub use transport::{HttpResponse, Transport, UreqTransport};
