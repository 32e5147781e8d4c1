//! HTTP request handlers for the catalog API.

pub mod datasets;
pub mod health;
pub mod parameters;

/// Count a request against its endpoint label.
pub(crate) fn record_request(endpoint: &'static str) {
    metrics::counter!("catalog_requests_total", "endpoint" => endpoint).increment(1);
}
