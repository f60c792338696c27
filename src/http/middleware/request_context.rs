//! Snapshot capture middleware.
//! Builds the request context once per request, before any handler runs.

use axum::{
    body::{self, Body},
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::context::{set_request_id, Context};
use crate::http::request::parse_request_id;
use crate::snapshot::{make_request_info_context, InboundRequest};

/// Limits applied while capturing.
#[derive(Debug, Clone, Copy)]
pub struct CaptureLimits {
    pub max_body_size: usize,
}

/// Buffers the body, snapshots the request and stores the resulting
/// [`Context`] in the request extensions.
///
/// Must run inside the request-ID layer so `x-request-id` is already set.
/// Handlers read the context with `Extension<Context>`.
pub async fn request_context_middleware(
    State(limits): State<CaptureLimits>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match body::to_bytes(body, limits.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, limit = limits.max_body_size, "Request body rejected");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body rejected").into_response();
        }
    };

    let inbound = InboundRequest::from_parts(&parts, bytes.clone());
    let ctx = set_request_id(&Context::background(), parse_request_id(&parts.headers));
    let ctx = make_request_info_context(Some(&ctx), Some(&inbound));

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(ctx);
    next.run(request).await
}
