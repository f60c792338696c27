//! The logger handed to application code.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use super::backend::{Backend, StreamBackend, TracingBackend};
use super::enrich::{http_fields, FIELD_SERVICE_NAME};
use super::{Encoding, Field, Level, Record};
use crate::config::{LoggerConfig, Output};
use crate::context::Context;
use crate::snapshot::request_info;

type FatalHook = Arc<dyn Fn() + Send + Sync>;

struct Shared {
    config: LoggerConfig,
    backend: Arc<dyn Backend>,
    fatal_hook: FatalHook,
}

/// Leveled logger that enriches records with the request in scope.
///
/// Cloning is cheap. Child loggers created by [`Logger::with_field`] or by
/// enrichment share the backend but own a separate field set, so attaching a
/// field never affects the parent or concurrent callers.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    fields: Arc<Vec<Field>>,
}

impl Logger {
    /// Build a logger writing to the output named in `config`.
    pub fn new(config: LoggerConfig) -> Self {
        let encoding = Encoding::from_json_flag(config.json_encoding);
        let backend: Arc<dyn Backend> = match config.output {
            Output::Stdout => Arc::new(StreamBackend::stdout(encoding)),
            Output::Stderr => Arc::new(StreamBackend::stderr(encoding)),
            Output::Tracing => Arc::new(TracingBackend),
        };
        Self::with_backend(config, backend)
    }

    /// Build a logger around a caller-supplied backend.
    pub fn with_backend(config: LoggerConfig, backend: Arc<dyn Backend>) -> Self {
        let mut fields = Vec::new();
        if !config.service_name.is_empty() {
            fields.push((
                FIELD_SERVICE_NAME.to_string(),
                Value::from(config.service_name.as_str()),
            ));
        }

        Self {
            shared: Arc::new(Shared {
                config,
                backend,
                fatal_hook: Arc::new(|| {
                    std::process::exit(1);
                }),
            }),
            fields: Arc::new(fields),
        }
    }

    /// Replace what happens after a fatal record is written.
    #[must_use]
    pub fn with_fatal_hook<F>(self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                config: self.shared.config.clone(),
                backend: Arc::clone(&self.shared.backend),
                fatal_hook: Arc::new(hook),
            }),
            fields: self.fields,
        }
    }

    /// Fields attached to every record from this logger.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.shared.config.level.min_level()
    }

    /// A child logger with one more field.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_fields(std::iter::once((key.into(), value.into())))
    }

    fn with_fields(&self, extra: impl IntoIterator<Item = Field>) -> Self {
        let mut fields = Vec::clone(&self.fields);
        fields.extend(extra);
        Self {
            shared: Arc::clone(&self.shared),
            fields: Arc::new(fields),
        }
    }

    /// Child logger carrying the HTTP fields of the snapshot in `ctx`, or a
    /// plain clone when there is none.
    fn enriched(&self, ctx: &Context) -> Self {
        match request_info(ctx) {
            Some(info) => self.with_fields(http_fields(&info, &self.shared.config)),
            None => self.clone(),
        }
    }

    /// Bind this logger to the request in `ctx` once, at ingress.
    pub fn scoped(&self, ctx: &Context) -> RequestLogger {
        RequestLogger {
            logger: self.enriched(ctx),
        }
    }

    #[track_caller]
    fn log(&self, ctx: Option<&Context>, level: Level, message: &dyn fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        let caller = Location::caller();
        match ctx {
            Some(ctx) => self.enriched(ctx).emit(level, message, caller),
            None => self.emit(level, message, caller),
        }
    }

    fn emit(&self, level: Level, message: &dyn fmt::Display, caller: &'static Location<'static>) {
        let record = Record {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            caller,
            fields: Vec::clone(&self.fields),
            stacktrace: capture_stacktrace(level),
        };

        let backend = &self.shared.backend;
        backend.write(&record);

        if level == Level::Fatal {
            backend.flush();
            (self.shared.fatal_hook)();
        }
    }

    #[track_caller]
    pub fn debug(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(Some(ctx), Level::Debug, &message);
    }

    #[track_caller]
    pub fn debugf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(Some(ctx), Level::Debug, &args);
    }

    #[track_caller]
    pub fn info(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(Some(ctx), Level::Info, &message);
    }

    #[track_caller]
    pub fn infof(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(Some(ctx), Level::Info, &args);
    }

    #[track_caller]
    pub fn warn(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(Some(ctx), Level::Warn, &message);
    }

    #[track_caller]
    pub fn warnf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(Some(ctx), Level::Warn, &args);
    }

    #[track_caller]
    pub fn error(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(Some(ctx), Level::Error, &message);
    }

    #[track_caller]
    pub fn errorf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(Some(ctx), Level::Error, &args);
    }

    /// Log at fatal, flush, then run the fatal hook (process exit unless
    /// replaced).
    #[track_caller]
    pub fn fatal(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(Some(ctx), Level::Fatal, &message);
    }

    #[track_caller]
    pub fn fatalf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
        self.log(Some(ctx), Level::Fatal, &args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.shared.config)
            .field("backend", &self.shared.backend)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

fn capture_stacktrace(level: Level) -> Option<String> {
    if level < Level::Error {
        return None;
    }
    let trace = Backtrace::force_capture();
    match trace.status() {
        BacktraceStatus::Captured => Some(trace.to_string()),
        _ => None,
    }
}

/// A logger already bound to one request's snapshot.
#[derive(Clone, Debug)]
pub struct RequestLogger {
    logger: Logger,
}

impl RequestLogger {
    pub fn fields(&self) -> &[Field] {
        self.logger.fields()
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            logger: self.logger.with_field(key, value),
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.logger.log(None, Level::Debug, &message);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(None, Level::Debug, &args);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.logger.log(None, Level::Info, &message);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logger.log(None, Level::Info, &args);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.logger.log(None, Level::Warn, &message);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(None, Level::Warn, &args);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.logger.log(None, Level::Error, &message);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(None, Level::Error, &args);
    }

    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.logger.log(None, Level::Fatal, &message);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(None, Level::Fatal, &args);
    }
}
