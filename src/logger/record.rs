//! The unit handed to a backend.

use std::panic::Location;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::Level;

/// One structured field. Names may repeat; order is attachment order.
pub type Field = (String, Value);

/// A finished log record.
#[derive(Debug, Clone)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    /// Call site of the public logging method.
    pub caller: &'static Location<'static>,
    pub fields: Vec<Field>,
    pub stacktrace: Option<String>,
}

impl Record {
    /// Value of the last field named `name`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// `file:line` of the call site.
    pub fn caller_string(&self) -> String {
        format!("{}:{}", self.caller.file(), self.caller.line())
    }
}
