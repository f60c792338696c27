//! Line encoders for stream backends.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::Record;

/// RFC 3339 in UTC with nine fractional digits, e.g.
/// `2024-05-01T12:00:00.000000001Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// How a record is rendered to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// One JSON object per line.
    Json,
    /// Tab-separated text with fields as a trailing JSON object.
    Console,
}

impl Encoding {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Encoding::Json
        } else {
            Encoding::Console
        }
    }

    /// Render `record` without a trailing newline.
    pub fn encode(self, record: &Record) -> String {
        match self {
            Encoding::Json => encode_json(record),
            Encoding::Console => encode_console(record),
        }
    }
}

/// Appends `"key":value` to an object under construction. Keys are written in
/// order and may repeat.
struct ObjectWriter {
    out: String,
    empty: bool,
}

impl ObjectWriter {
    fn new() -> Self {
        Self {
            out: String::from("{"),
            empty: true,
        }
    }

    fn entry(&mut self, key: &str, value: &Value) {
        if !self.empty {
            self.out.push(',');
        }
        self.empty = false;
        self.out.push_str(&Value::from(key).to_string());
        self.out.push(':');
        self.out.push_str(&value.to_string());
    }

    fn finish(mut self) -> String {
        self.out.push('}');
        self.out
    }
}

fn encode_json(record: &Record) -> String {
    let mut obj = ObjectWriter::new();
    obj.entry("level", &Value::from(record.level.as_str()));
    obj.entry("ts", &Value::from(format_timestamp(&record.timestamp)));
    obj.entry("caller", &Value::from(record.caller_string()));
    obj.entry("msg", &Value::from(record.message.as_str()));
    for (key, value) in &record.fields {
        obj.entry(key, value);
    }
    if let Some(trace) = &record.stacktrace {
        obj.entry("stacktrace", &Value::from(trace.as_str()));
    }
    obj.finish()
}

fn encode_console(record: &Record) -> String {
    let mut line = format!(
        "{}\t{}\t{}\t{}",
        format_timestamp(&record.timestamp),
        record.level.as_upper(),
        record.caller_string(),
        record.message,
    );

    if !record.fields.is_empty() {
        let mut obj = ObjectWriter::new();
        for (key, value) in &record.fields {
            obj.entry(key, value);
        }
        line.push('\t');
        line.push_str(&obj.finish());
    }

    if let Some(trace) = &record.stacktrace {
        line.push('\n');
        line.push_str(trace.trim_end());
    }

    line
}
