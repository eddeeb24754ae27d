//! Common test helpers and utilities shared across test suite.

use std::cell::RefCell;

use cerl::{AmpleClient, CerlError, HttpResponse, PagingOptions, Result, Transport};
use serde_json::{json, Value};

/// Host used by all fake-transport tests.
#[allow(dead_code)]
pub const TEST_HOST: &str = "records.test/db";

/// A scripted transport that answers from a closure and records every URL.
pub struct FakeTransport {
    responder: Box<dyn Fn(&str) -> Result<HttpResponse>>,
    requests: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl FakeTransport {
    /// Answer every request with `responder(url)`.
    pub fn new(responder: impl Fn(&str) -> Result<HttpResponse> + 'static) -> Self {
        FakeTransport {
            responder: Box::new(responder),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answer every request with `200` and the given text.
    pub fn text(body: &'static str) -> Self {
        Self::new(move |_| Ok(HttpResponse::new(200, body)))
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Number of requests issued so far.
    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(url.to_string());
        (self.responder)(url)
    }
}

/// Extract a query parameter from a URL.
#[allow(dead_code)]
pub fn param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// `count` rows with ids `row-{start}` onwards.
#[allow(dead_code)]
pub fn rows(start: u64, count: u64) -> Vec<Value> {
    (start..start + count)
        .map(|i| json!({"id": format!("row-{i}")}))
        .collect()
}

/// A search service with `hits` results, serving `per_page(offset)` rows per page.
///
/// `hits_body` is the JSON returned for the `size=1` hit-count request.
#[allow(dead_code)]
pub fn search_service(
    hits_body: Value,
    per_page: impl Fn(u64) -> u64 + 'static,
) -> FakeTransport {
    FakeTransport::new(move |url| {
        if param(url, "size").as_deref() == Some("1") {
            return Ok(HttpResponse::new(200, hits_body.to_string()));
        }
        let offset: u64 = param(url, "from")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| CerlError::malformed(format!("no offset in {url}")))?;
        let body = json!({ "rows": rows(offset, per_page(offset)) });
        Ok(HttpResponse::new(200, body.to_string()))
    })
}

/// Client over a borrowed fake transport with default paging.
#[allow(dead_code)]
pub fn client(transport: &FakeTransport) -> AmpleClient<&FakeTransport> {
    AmpleClient::with_transport(transport, PagingOptions::default())
}
