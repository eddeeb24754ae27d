//! Fetching single records.
//!
//! Records are addressed by identifier under an endpoint. [`fetch_record`]
//! returns the parsed JSON record; [`fetch_record_export`] returns the raw
//! text of one of the [`ExportFormat`] representations.

use serde_json::Value;
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::transport::{HttpResponse, Transport};

fn request<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    scheme: &str,
    id: &str,
    format: ExportFormat,
) -> Result<HttpResponse> {
    let (representation, style) = format.request_params();
    let url = endpoint.record_url(scheme, id, representation, style);
    debug!(%endpoint, id, %format, "fetching record");
    transport.get(&url)
}

/// Fetch a record as structured JSON.
///
/// # Errors
///
/// Returns transport errors, and [`CerlError::MalformedResponse`](crate::CerlError::MalformedResponse)
/// if the body is not JSON.
pub fn fetch_record<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    scheme: &str,
    id: &str,
) -> Result<Value> {
    request(transport, endpoint, scheme, id, ExportFormat::Json)?.json()
}

/// Fetch a record as text in an export format.
///
/// `selector` is looked up with [`ExportFormat::from_selector`], so unknown
/// selectors fetch the default JSON representation. The body is not parsed.
///
/// # Errors
///
/// Returns transport errors.
pub fn fetch_record_export<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    scheme: &str,
    id: &str,
    selector: &str,
) -> Result<String> {
    let format = ExportFormat::from_selector(selector);
    Ok(request(transport, endpoint, scheme, id, format)?.into_text())
}
