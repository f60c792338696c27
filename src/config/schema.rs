//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section is optional; missing keys take the `Default` values below.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Logger settings, fixed for the lifetime of the process.
    pub logger: LoggerConfig,

    /// Demo HTTP server settings.
    pub server: ServerConfig,
}

/// Severity gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including debug records.
    Debug,
    /// Info and above.
    #[default]
    Production,
}

/// How the request method and URL are attached to records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodFieldStyle {
    /// A field named after the method (`"GET": "/items/42"`).
    #[default]
    Legacy,
    /// `HTTP_Method` and `HTTP_URL`.
    Named,
}

/// Where records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    /// Forward to the process-wide `tracing` subscriber.
    Tracing,
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Added to every record as `service_name` when non-empty.
    pub service_name: String,

    /// Severity gate.
    pub level: LogLevel,

    /// JSON lines when true, tab-separated console text otherwise.
    pub json_encoding: bool,

    /// Attach `HTTP_Headers` to enriched records.
    pub show_headers: bool,

    /// Attach `HTTP_Body` to enriched records.
    pub show_body: bool,

    /// Method/URL field layout.
    pub method_field: MethodFieldStyle,

    /// Output stream.
    pub output: Output,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            level: LogLevel::Production,
            json_encoding: true,
            show_headers: false,
            show_body: false,
            method_field: MethodFieldStyle::Legacy,
            output: Output::Stdout,
        }
    }
}

/// Demo server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Largest request body buffered for the snapshot, in bytes.
    pub max_body_size: usize,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
            request_timeout_secs: 30,
        }
    }
}
