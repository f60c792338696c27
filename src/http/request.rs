//! Request identifiers.
//!
//! # Responsibilities
//! - Generate a unique integer request ID for requests that arrive without one
//! - Read the request ID back from headers for snapshot capture
//!
//! # Design Decisions
//! - Request ID added as early as possible (outermost layer)
//! - An upstream `x-request-id` is kept as-is; non-numeric values resolve to 0
//! - IDs are a per-process sequence starting at 1

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

/// Header carrying the request ID in both directions.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Hands out 1, 2, 3, ... Clones share the counter.
#[derive(Debug, Clone)]
pub struct SequentialRequestId {
    next: Arc<AtomicI64>,
}

impl SequentialRequestId {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i64) -> Self {
        Self {
            next: Arc::new(AtomicI64::new(first)),
        }
    }
}

impl Default for SequentialRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl MakeRequestId for SequentialRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        Some(RequestId::new(HeaderValue::from(id)))
    }
}

/// The numeric request ID in `headers`, or `0` when absent or not a number.
pub fn parse_request_id(headers: &HeaderMap) -> i64 {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}
