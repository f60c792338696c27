//! HTTP ingress subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → request.rs (assign x-request-id if missing)
//!     → middleware/request_context.rs (buffer body, snapshot, Context into extensions)
//!     → handler logs through Logger with the Context
//!     → response carries x-request-id back to the client
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::{request_context_middleware, CaptureLimits};
pub use request::{parse_request_id, SequentialRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
