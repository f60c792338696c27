//! Request-Scoped Logger Library

pub mod config;
pub mod context;
pub mod http;
pub mod logger;
pub mod snapshot;

pub use config::schema::AppConfig;
pub use context::Context;
pub use http::HttpServer;
pub use logger::Logger;
