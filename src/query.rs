//! Aggregating a search into a single result.
//!
//! [`aggregate`] drains a [`QueryPager`] and assembles a [`QueryResult`]: the
//! hit count reported by the service plus every row fetched, flattened into
//! one list in page order.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CerlError, Result};
use crate::pager::{Page, QueryPager};
use crate::transport::Transport;

/// Outcome of a search.
///
/// `hits` is the total reported by the service and may exceed the number of
/// rows, since no more than 10 000 rows can be paged through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    hits: u64,
    rows: Vec<Value>,
}

impl QueryResult {
    /// Number of hits reported by the service.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// The (abbreviated) records returned, in service order.
    #[must_use]
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Consume the result and return its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Value> {
        self.rows
    }

    /// `true` when no rows were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `id` of every row, `None` where a row has no string `id`.
    #[must_use]
    pub fn ids(&self) -> Vec<Option<String>> {
        ids_from_result(self)
    }
}

/// Drive `pager` to completion.
///
/// A hit count of zero returns an empty result without requesting any page.
/// Rows beyond `min(hits, result_window)` are discarded.
///
/// # Errors
///
/// Propagates the first transport or response error; rows fetched before it
/// are discarded.
pub fn aggregate<T: Transport>(mut pager: QueryPager<T>) -> Result<QueryResult> {
    let hits = match pager.next() {
        Some(Ok(Page::HitCount(hits))) => hits,
        Some(Ok(Page::Rows(_))) | None => {
            return Err(CerlError::malformed("search yielded no hit count"));
        },
        Some(Err(e)) => return Err(e),
    };

    if hits == 0 {
        return Ok(QueryResult {
            hits,
            rows: Vec::new(),
        });
    }

    let limit = usize::try_from(hits.min(pager.options().result_window)).unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    for page in pager {
        match page? {
            Page::Rows(page_rows) => rows.extend(page_rows),
            Page::HitCount(_) => {
                return Err(CerlError::malformed("search yielded a second hit count"));
            },
        }
    }
    rows.truncate(limit);

    Ok(QueryResult { hits, rows })
}

/// The `id` field of every row in `result`.
///
/// Rows without a string `id` map to `None`, so the output lines up with
/// [`QueryResult::rows`].
#[must_use]
pub fn ids_from_result(result: &QueryResult) -> Vec<Option<String>> {
    result
        .rows
        .iter()
        .map(|row| row.get("id").and_then(Value::as_str).map(String::from))
        .collect()
}
