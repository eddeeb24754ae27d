//! Service endpoints and request URLs.
//!
//! An [`Endpoint`] is just a host string such as `data.cerl.org/thesaurus`.
//! All four CERL databases speak the same API, so they differ only in that
//! string; any other host is equally valid.

use std::borrow::Cow;
use std::fmt;

/// Host of the CERL Thesaurus.
pub const THESAURUS_HOST: &str = "data.cerl.org/thesaurus";
/// Host of the Incunabula Short Title Catalogue.
pub const ISTC_HOST: &str = "data.cerl.org/istc";
/// Host of the holding institutions database.
pub const HOLDINST_HOST: &str = "data.cerl.org/holdinst";
/// Host of Material Evidence in Incunabula.
pub const MEI_HOST: &str = "data.cerl.org/mei";

/// A record service host.
///
/// # Examples
///
/// ```
/// use cerl::Endpoint;
///
/// assert_eq!(Endpoint::THESAURUS.host(), "data.cerl.org/thesaurus");
/// assert_eq!(Endpoint::new("example.org/db").base_url("https"), "https://example.org/db");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: Cow<'static, str>,
}

impl Endpoint {
    /// The CERL Thesaurus.
    pub const THESAURUS: Endpoint = Endpoint::from_static(THESAURUS_HOST);
    /// The Incunabula Short Title Catalogue.
    pub const ISTC: Endpoint = Endpoint::from_static(ISTC_HOST);
    /// The holding institutions database.
    pub const HOLDINST: Endpoint = Endpoint::from_static(HOLDINST_HOST);
    /// Material Evidence in Incunabula.
    pub const MEI: Endpoint = Endpoint::from_static(MEI_HOST);

    /// An endpoint for an arbitrary host (no scheme, no trailing slash).
    pub fn new(host: impl Into<String>) -> Self {
        Endpoint {
            host: Cow::Owned(host.into()),
        }
    }

    const fn from_static(host: &'static str) -> Self {
        Endpoint {
            host: Cow::Borrowed(host),
        }
    }

    /// The host string.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `{scheme}://{host}`
    #[must_use]
    pub fn base_url(&self, scheme: &str) -> String {
        format!("{scheme}://{}", self.host)
    }

    /// URL of a search request.
    ///
    /// `from` is omitted for the hit-count request.
    #[must_use]
    pub fn search_url(&self, scheme: &str, query: &str, size: u64, from: Option<u64>) -> String {
        let mut url = format!(
            "{}/_search?query={}&size={size}",
            self.base_url(scheme),
            quote(query)
        );
        if let Some(offset) = from {
            url.push_str(&format!("&from={offset}"));
        }
        url.push_str("&format=json");
        url
    }

    /// URL of a single record in the given representation and style.
    #[must_use]
    pub fn record_url(
        &self,
        scheme: &str,
        id: &str,
        representation: &str,
        style: Option<&str>,
    ) -> String {
        let mut url = format!(
            "{}/{}?format={representation}",
            self.base_url(scheme),
            quote(id)
        );
        if let Some(style) = style {
            url.push_str("&style=");
            url.push_str(style);
        }
        url
    }
}

/// Percent-encode everything except unreserved characters and `/`.
///
/// Slashes are kept so an identifier like `a b/c` addresses the path
/// `a%20b/c`, the same resource the service's own clients request.
#[must_use]
pub fn quote(text: &str) -> String {
    text.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

impl From<&str> for Endpoint {
    fn from(host: &str) -> Self {
        Endpoint::new(host)
    }
}

impl From<String> for Endpoint {
    fn from(host: String) -> Self {
        Endpoint::new(host)
    }
}
