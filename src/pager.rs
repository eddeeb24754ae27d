//! Paging through search results.
//!
//! A search is answered in two phases. A first request with `size=1` asks the
//! service for the total hit count; then pages of [`PagingOptions::page_size`]
//! rows are fetched at increasing offsets until either the hit count or the
//! result window of the underlying search engine (10 000) is reached.
//!
//! [`QueryPager`] exposes this as a lazy iterator. Its first item is always
//! [`Page::HitCount`]; every later item is [`Page::Rows`]. Each pager issues
//! fresh requests and cannot be restarted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::endpoint::Endpoint;
use crate::error::{CerlError, Result};
use crate::transport::Transport;

/// Rows requested per page.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Largest offset the search engine will serve.
pub const RESULT_WINDOW: u64 = 10_000;

/// How the offset advances after a page has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StridePolicy {
    /// Advance by the page size, regardless of how many rows came back (default).
    #[default]
    Fixed,
    /// Advance by the number of rows returned; an empty page ends paging.
    Returned,
}

impl StridePolicy {
    /// The offset following `offset` after a page of `returned` rows, or
    /// `None` when paging must stop (including on overflow).
    #[must_use]
    pub fn next_offset(self, offset: u64, page_size: u64, returned: usize) -> Option<u64> {
        match self {
            Self::Fixed => offset.checked_add(page_size),
            Self::Returned if returned == 0 => None,
            Self::Returned => offset.checked_add(returned as u64),
        }
    }
}

/// Page size, result window and stride used by [`QueryPager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingOptions {
    /// Rows requested per page
    pub page_size: u64,
    /// No page is requested at or beyond this offset
    pub result_window: u64,
    /// How the offset advances between pages
    pub stride: StridePolicy,
}

impl Default for PagingOptions {
    fn default() -> Self {
        PagingOptions {
            page_size: DEFAULT_PAGE_SIZE,
            result_window: RESULT_WINDOW,
            stride: StridePolicy::Fixed,
        }
    }
}

impl PagingOptions {
    /// Options the pager can actually honour.
    ///
    /// A zero page size never advances the offset, so it falls back to
    /// [`DEFAULT_PAGE_SIZE`]. The result window is capped at
    /// [`RESULT_WINDOW`], beyond which the service returns nothing.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self.result_window = self.result_window.min(RESULT_WINDOW);
        self
    }
}

/// One item produced by a [`QueryPager`].
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Total number of hits reported by the service (always first)
    HitCount(u64),
    /// One page of abbreviated records
    Rows(Vec<Value>),
}

#[derive(Debug, Clone, Copy)]
enum State {
    Start,
    Paging { hits: u64, offset: u64 },
    Done,
}

/// Lazy iterator over the pages of a search.
///
/// After the first error the pager is exhausted; pages already yielded stay
/// valid but the sequence cannot be resumed.
#[derive(Debug)]
pub struct QueryPager<T> {
    transport: T,
    endpoint: Endpoint,
    scheme: String,
    query: String,
    options: PagingOptions,
    state: State,
}

impl<T: Transport> QueryPager<T> {
    /// Create a pager. No request is issued until the first call to `next`.
    ///
    /// `options` are passed through [`PagingOptions::normalized`].
    pub fn new(
        transport: T,
        endpoint: Endpoint,
        scheme: impl Into<String>,
        query: impl Into<String>,
        options: PagingOptions,
    ) -> Self {
        QueryPager {
            transport,
            endpoint,
            scheme: scheme.into(),
            query: query.into(),
            options: options.normalized(),
            state: State::Start,
        }
    }

    /// The paging options in use.
    #[must_use]
    pub fn options(&self) -> &PagingOptions {
        &self.options
    }

    fn fetch_hits(&self) -> Result<u64> {
        query_hits(&self.transport, &self.endpoint, &self.scheme, &self.query)
    }

    fn fetch_rows(&self, offset: u64) -> Result<Vec<Value>> {
        let url = self.endpoint.search_url(
            &self.scheme,
            &self.query,
            self.options.page_size,
            Some(offset),
        );
        let body = self.transport.get(&url)?.json()?;
        let rows = parse_rows(body)?;
        debug!(endpoint = %self.endpoint, offset, rows = rows.len(), "fetched page");
        Ok(rows)
    }

    fn in_window(&self, hits: u64, offset: u64) -> bool {
        offset < hits && offset < self.options.result_window
    }
}

impl<T: Transport> Iterator for QueryPager<T> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Start => match self.fetch_hits() {
                Ok(hits) => {
                    self.state = State::Paging { hits, offset: 0 };
                    Some(Ok(Page::HitCount(hits)))
                },
                Err(e) => {
                    self.state = State::Done;
                    Some(Err(e))
                },
            },
            State::Paging { hits, offset } => {
                if !self.in_window(hits, offset) {
                    self.state = State::Done;
                    return None;
                }
                match self.fetch_rows(offset) {
                    Ok(rows) => {
                        self.state = match self.options.stride.next_offset(
                            offset,
                            self.options.page_size,
                            rows.len(),
                        ) {
                            Some(next) => State::Paging { hits, offset: next },
                            None => State::Done,
                        };
                        Some(Ok(Page::Rows(rows)))
                    },
                    Err(e) => {
                        self.state = State::Done;
                        Some(Err(e))
                    },
                }
            },
        }
    }
}

impl<T: Transport> std::iter::FusedIterator for QueryPager<T> {}

/// Ask the service how many records match `query`.
///
/// # Errors
///
/// Returns transport errors, and [`CerlError::MalformedResponse`] if the
/// response carries no usable hit count.
pub fn query_hits<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    scheme: &str,
    query: &str,
) -> Result<u64> {
    let url = endpoint.search_url(scheme, query, 1, None);
    let body = transport.get(&url)?.json()?;
    let hits = parse_hit_count(&body)?;
    trace!(%endpoint, query, hits, "hit count");
    Ok(hits)
}

/// Read the hit count from a search response.
///
/// The service answers either `{"hits": 12}` or `{"hits": {"value": 12}}`;
/// a missing `value` in the second shape counts as zero.
///
/// # Errors
///
/// Returns [`CerlError::MalformedResponse`] if the body is not an object, has
/// no `hits` field, or the count is not a non-negative integer.
pub fn parse_hit_count(body: &Value) -> Result<u64> {
    let object = body
        .as_object()
        .ok_or_else(|| CerlError::malformed("search response is not an object"))?;
    let hits = object
        .get("hits")
        .ok_or_else(|| CerlError::malformed("search response has no 'hits' field"))?;

    let count = match hits {
        Value::Object(inner) => match inner.get("value") {
            Some(value) => value,
            None => return Ok(0),
        },
        other => other,
    };

    count
        .as_u64()
        .ok_or_else(|| CerlError::malformed(format!("hit count is not a non-negative integer: {count}")))
}

/// Take the `rows` array out of a search response (absent means no rows).
///
/// # Errors
///
/// Returns [`CerlError::MalformedResponse`] if the body is not an object or
/// `rows` is not an array.
pub fn parse_rows(body: Value) -> Result<Vec<Value>> {
    let Value::Object(mut object) = body else {
        return Err(CerlError::malformed("search response is not an object"));
    };
    match object.remove("rows") {
        None => Ok(Vec::new()),
        Some(Value::Array(rows)) => Ok(rows),
        Some(other) => Err(CerlError::malformed(format!(
            "'rows' is not an array: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_count_bare_integer() {
        assert_eq!(parse_hit_count(&json!({"hits": 250})).unwrap(), 250);
    }

    #[test]
    fn test_hit_count_object() {
        assert_eq!(
            parse_hit_count(&json!({"hits": {"value": 12000, "relation": "eq"}})).unwrap(),
            12000
        );
    }

    #[test]
    fn test_hit_count_object_without_value() {
        assert_eq!(parse_hit_count(&json!({"hits": {}})).unwrap(), 0);
    }

    #[test]
    fn test_hit_count_malformed() {
        assert!(parse_hit_count(&json!([1])).is_err());
        assert!(parse_hit_count(&json!({"total": 1})).is_err());
        assert!(parse_hit_count(&json!({"hits": "many"})).is_err());
        assert!(parse_hit_count(&json!({"hits": -1})).is_err());
    }

    #[test]
    fn test_rows_default_empty() {
        assert!(parse_rows(json!({"hits": 3})).unwrap().is_empty());
    }

    #[test]
    fn test_rows_not_array() {
        assert!(matches!(
            parse_rows(json!({"rows": {"id": 1}})),
            Err(CerlError::MalformedResponse(_))
        ));
        assert!(parse_rows(json!("rows")).is_err());
    }

    #[test]
    fn test_fixed_stride_ignores_short_pages() {
        assert_eq!(StridePolicy::Fixed.next_offset(0, 100, 7), Some(100));
        assert_eq!(StridePolicy::Fixed.next_offset(100, 100, 0), Some(200));
    }

    #[test]
    fn test_stride_stops_on_overflow() {
        assert_eq!(StridePolicy::Fixed.next_offset(u64::MAX - 10, 100, 100), None);
        assert_eq!(StridePolicy::Returned.next_offset(u64::MAX, 100, 1), None);
    }

    #[test]
    fn test_normalized_options() {
        let options = PagingOptions {
            page_size: 0,
            result_window: 50_000,
            stride: StridePolicy::Returned,
        }
        .normalized();
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(options.result_window, RESULT_WINDOW);
        assert_eq!(options.stride, StridePolicy::Returned);

        let small = PagingOptions {
            page_size: 25,
            result_window: 500,
            ..PagingOptions::default()
        };
        assert_eq!(small.clone().normalized(), small);
    }

    #[test]
    fn test_returned_stride() {
        assert_eq!(StridePolicy::Returned.next_offset(100, 100, 40), Some(140));
        assert_eq!(StridePolicy::Returned.next_offset(100, 100, 0), None);
    }
}
