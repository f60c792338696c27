//! Output backends.
//!
//! # Responsibilities
//! - Receive finished records and write them somewhere
//! - Serialize concurrent writes (the only shared mutable state)
//!
//! # Design Decisions
//! - Write failures are reported through `tracing` and otherwise dropped
//! - No buffering: each record is written and flushed as one line

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use super::{Encoding, Level, Record};

/// Destination for finished records.
pub trait Backend: fmt::Debug + Send + Sync {
    fn write(&self, record: &Record);

    /// Push out anything buffered. Called before a fatal hook runs.
    fn flush(&self) {}
}

/// Writes encoded lines to a single stream.
pub struct StreamBackend {
    target: &'static str,
    encoding: Encoding,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamBackend {
    pub fn new(encoding: Encoding, writer: Box<dyn Write + Send>) -> Self {
        Self::labelled("writer", encoding, writer)
    }

    pub fn stdout(encoding: Encoding) -> Self {
        Self::labelled("stdout", encoding, Box::new(io::stdout()))
    }

    pub fn stderr(encoding: Encoding) -> Self {
        Self::labelled("stderr", encoding, Box::new(io::stderr()))
    }

    fn labelled(target: &'static str, encoding: Encoding, writer: Box<dyn Write + Send>) -> Self {
        Self {
            target,
            encoding,
            writer: Mutex::new(writer),
        }
    }
}

impl fmt::Debug for StreamBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBackend")
            .field("target", &self.target)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl Backend for StreamBackend {
    fn write(&self, record: &Record) {
        let line = self.encoding.encode(record);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            tracing::warn!(error = %e, "failed to write log record");
        }
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.flush() {
            tracing::warn!(error = %e, "failed to flush log stream");
        }
    }
}

/// Forwards records as `tracing` events.
///
/// Structured fields travel as one JSON object in the `fields` field, since
/// `tracing` field names must be known at compile time. Fatal records are
/// emitted at `ERROR` with `fatal = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl Backend for TracingBackend {
    fn write(&self, record: &Record) {
        let fields = Value::Object(
            record
                .fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        );
        let caller = record.caller_string();
        let msg = record.message.as_str();

        match record.level {
            Level::Debug => tracing::debug!(caller = %caller, fields = %fields, "{msg}"),
            Level::Info => tracing::info!(caller = %caller, fields = %fields, "{msg}"),
            Level::Warn => tracing::warn!(caller = %caller, fields = %fields, "{msg}"),
            Level::Error => tracing::error!(caller = %caller, fields = %fields, "{msg}"),
            Level::Fatal => {
                tracing::error!(caller = %caller, fields = %fields, fatal = true, "{msg}");
            }
        }
    }
}

/// Keeps records in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBackend {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CaptureBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Backend for CaptureBackend {
    fn write(&self, record: &Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
