//! Structured logging facade with request enrichment.
//!
//! # Data Flow
//! ```text
//! Logger::info(&ctx, msg)
//!     → level gate (LogLevel::Debug = all, Production = info and above)
//!     → enrich.rs (snapshot in ctx? derive a child logger with HTTP_* fields)
//!     → record.rs (Record: ts, level, caller, msg, fields)
//!     → backend.rs (stream: encoder.rs → stdout/stderr | tracing | capture)
//! ```
//!
//! # Design Decisions
//! - No global logger: build one at startup and pass it around
//! - Field sets are copy-on-write; enrichment never touches the base logger
//! - Callers are tracked with `#[track_caller]`, not stack walking
//! - Fatal records run a hook after flushing (process exit by default)

mod backend;
mod encoder;
mod enrich;
mod facade;
mod level;
mod macros;
mod record;

pub use backend::{Backend, CaptureBackend, StreamBackend, TracingBackend};
pub use encoder::{format_timestamp, Encoding};
pub use enrich::{
    http_fields, serialize_headers, FIELD_BODY, FIELD_HEADERS, FIELD_METHOD, FIELD_REQUEST_ID,
    FIELD_SERVICE_NAME, FIELD_URL,
};
pub use facade::{Logger, RequestLogger};
pub use level::Level;
pub use record::{Field, Record};

pub use crate::config::{LogLevel, LoggerConfig, MethodFieldStyle, Output};
