//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo handler
//! - Wire up middleware (tracing, timeout, request ID, snapshot capture)
//! - Bind server to listener
//! - Log every handled request through the injected Logger

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::IntoResponse,
    routing::any,
    Extension, Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::context::{get_request_id, Context};
use crate::http::middleware::{request_context_middleware, CaptureLimits};
use crate::http::request::{SequentialRequestId, X_REQUEST_ID};
use crate::logger::Logger;
use crate::snapshot::request_info;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub logger: Logger,
}

/// Demo HTTP server that logs every request with its snapshot.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig, logger: Logger) -> Self {
        Self {
            router: build_router(config, logger),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers are listed outermost first, so the request ID exists before the
/// snapshot is captured.
#[allow(deprecated)]
pub fn build_router(config: &ServerConfig, logger: Logger) -> Router {
    let limits = CaptureLimits {
        max_body_size: config.max_body_size,
    };

    Router::new()
        .route("/{*path}", any(echo_handler))
        .route("/", any(echo_handler))
        .with_state(AppState { logger })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), SequentialRequestId::new()))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
                .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
                .layer(middleware::from_fn_with_state(limits, request_context_middleware)),
        )
}

/// Logs the request and echoes what was captured about it.
async fn echo_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<Context>,
    request: Request<Body>,
) -> impl IntoResponse {
    state.logger.infof(
        &ctx,
        format_args!("handled {} {}", request.method(), request.uri().path()),
    );

    let info = request_info(&ctx).unwrap_or_default();
    Json(json!({
        "request_id": get_request_id(&ctx),
        "method": info.method,
        "url": info.url,
        "body_bytes": info.body.len(),
    }))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
