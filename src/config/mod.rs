//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI flags override individual fields (main.rs)
//!     → AppConfig (validated, immutable)
//!     → LoggerConfig moved into the Logger, ServerConfig into the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AppConfig, LogLevel, LoggerConfig, MethodFieldStyle, Output, ServerConfig};
pub use validation::{validate_config, ValidationError};
