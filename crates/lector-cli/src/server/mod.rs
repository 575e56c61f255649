//! HTTP server startup with lifecycle management.
//!
//! Binds the listener, serves the router, and drains in-flight requests
//! on SIGINT or SIGTERM before exiting.

mod error;
mod http_server;
mod shutdown;

use axum::Router;
pub use error::{Result, ServerError};
use http_server::serve_http;

use crate::config::ServerConfig;

/// Starts the HTTP server with graceful shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - The listener cannot bind to the specified address/port
/// - The server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}
