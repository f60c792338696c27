//! Snapshot construction and lookup.

use std::io::Read;
use std::sync::Arc;

use axum::body::Bytes;

use super::inbound::{BodySource, HeaderMultimap, InboundRequest};
use crate::context::{get_request_id, Context, ContextKey};

/// Body payload used when the body source could not be opened.
pub const BODY_ERROR_GETTING: &str = "error getting body";

/// Body payload used when the opened body could not be read.
pub const BODY_ERROR_READING: &str = "error reading body";

/// Immutable view of one inbound request, taken at ingress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub request_id: i64,
    pub headers: HeaderMultimap,
    pub method: String,
    pub url: String,
    pub body: Bytes,
}

impl RequestSnapshot {
    /// Capture `request` as seen through `ctx`.
    ///
    /// Without a request every field except the ID stays empty and the ID
    /// is `0`.
    pub fn capture(ctx: &Context, request: Option<&InboundRequest>) -> Self {
        let Some(request) = request else {
            return Self::default();
        };

        Self {
            request_id: get_request_id(ctx),
            headers: request.headers.clone(),
            method: request.method.clone(),
            url: request.url.clone(),
            body: request.get_body.as_ref().map(read_body).unwrap_or_default(),
        }
    }
}

struct RequestInfoKey;

impl ContextKey for RequestInfoKey {
    type Value = Arc<RequestSnapshot>;
    const NAME: &'static str = "request_info";
}

fn read_body(source: &BodySource) -> Bytes {
    let mut reader = match source.open() {
        Ok(reader) => reader,
        Err(e) => {
            tracing::debug!(error = %e, "request body unavailable");
            return Bytes::from_static(BODY_ERROR_GETTING.as_bytes());
        }
    };

    let mut buf = Vec::new();
    match reader.read_to_end(&mut buf) {
        Ok(_) => Bytes::from(buf),
        Err(e) => {
            tracing::debug!(error = %e, "request body read failed");
            Bytes::from_static(BODY_ERROR_READING.as_bytes())
        }
    }
}

/// Derive a context carrying a snapshot of `request`.
///
/// A missing `ctx` is replaced by an empty root. The snapshot is attached
/// even when `request` is `None`.
#[must_use]
pub fn make_request_info_context(
    ctx: Option<&Context>,
    request: Option<&InboundRequest>,
) -> Context {
    let ctx = ctx.cloned().unwrap_or_default();
    let snapshot = RequestSnapshot::capture(&ctx, request);
    ctx.with_value::<RequestInfoKey>(Arc::new(snapshot))
}

/// The snapshot attached to `ctx`, if any.
pub fn request_info(ctx: &Context) -> Option<Arc<RequestSnapshot>> {
    ctx.value::<RequestInfoKey>().cloned()
}
