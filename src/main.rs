//! Request-scoped logger demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ SetRequestId ─▶ snapshot capture ─▶ echo handler
//!                     (x-request-id)   (Context + RequestSnapshot)   │
//!                                                                    ▼
//!                                                     Logger (enriched with
//!                                                     HTTP_* fields) ─▶ stdout
//! ```
//!
//! Every request is logged once by the echo handler through the injected
//! [`Logger`], which picks the request ID, method, URL, and optionally the
//! headers and body out of the request's [`Context`](request_logger::Context).

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use request_logger::config::{load_config, validate_config, AppConfig, ConfigError, LogLevel};
use request_logger::http::HttpServer;
use request_logger::logger::Logger;

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "Echo server that logs every request with its captured snapshot", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `logger.json_encoding`
    #[arg(long)]
    json: Option<bool>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Attach request headers to records
    #[arg(long)]
    show_headers: bool,

    /// Attach request bodies to records
    #[arg(long)]
    show_body: bool,
}

impl Cli {
    fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(json) = self.json {
            config.logger.json_encoding = json;
        }
        if self.debug {
            config.logger.level = LogLevel::Debug;
        }
        config.logger.show_headers |= self.show_headers;
        config.logger.show_body |= self.show_body;

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_logger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        level = ?config.logger.level,
        json_encoding = config.logger.json_encoding,
        show_headers = config.logger.show_headers,
        show_body = config.logger.show_body,
        "Configuration loaded"
    );

    let logger = Logger::new(config.logger);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(&config.server, logger).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
