//! Request-scoped execution context.
//!
//! # Data Flow
//! ```text
//! ingress (http middleware)
//!     → request_id.rs (set_request_id: derive ctx with the request ID)
//!     → snapshot (make_request_info_context: derive ctx with the snapshot)
//!     → handlers receive the derived Context
//!     → logger reads the snapshot back on every log call
//! ```
//!
//! # Design Decisions
//! - Contexts are immutable chains; deriving never touches an ancestor
//! - Keys are types, not strings: equal names never collide
//! - Lookups are soft-fail: a missing or mistyped value reads as absent

mod chain;
mod request_id;

pub use chain::{Context, ContextKey};
pub use request_id::{get_request_id, request_id, set_request_id};
