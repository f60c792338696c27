//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (body limit > 0, timeout > 0)
//! - Check the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address is empty")]
    EmptyBindAddress,

    #[error("server.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("server.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let server = &config.server;

    if server.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    } else if server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(server.bind_address.clone()));
    }

    if server.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
