//! HTTP middleware.

pub mod request_context;

pub use request_context::{request_context_middleware, CaptureLimits};
