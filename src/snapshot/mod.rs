//! Request snapshot capture.
//!
//! # Data Flow
//! ```text
//! http::request::Parts + buffered body   (or a hand-built descriptor)
//!     → inbound.rs (InboundRequest: method, url, header multimap, body source)
//!     → capture.rs (RequestSnapshot::capture reads the request ID and body)
//!     → Context derived with Arc<RequestSnapshot> under a private key
//! ```
//!
//! # Design Decisions
//! - The snapshot is taken once at ingress and never mutated
//! - A snapshot is always attached, even with no request in scope
//! - Body read failures become sentinel payloads, never errors

mod capture;
mod inbound;

pub use capture::{
    make_request_info_context, request_info, RequestSnapshot, BODY_ERROR_GETTING,
    BODY_ERROR_READING,
};
pub use inbound::{BodyReader, BodySource, HeaderMultimap, InboundRequest};
