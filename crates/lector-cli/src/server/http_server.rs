//! HTTP server startup and lifecycle management.

use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::ServerConfig;
use crate::server::shutdown::shutdown_signal;
use crate::server::{Result, ServerError};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Starts an HTTP server with graceful shutdown.
///
/// Validates the configuration, binds to the specified address, and serves
/// requests until a shutdown signal arrives. In-flight requests are given
/// at most the configured shutdown timeout to drain before the process
/// stops waiting for them.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "invalid server configuration"
        );

        return Err(ServerError::InvalidConfig(validation_error.to_string()));
    }

    let server_addr = server_config.server_addr();

    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                "successfully bound to address"
            );

            listener
        }
        Err(listener_err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                error = %listener_err,
                "failed to bind to address"
            );

            return Err(ServerError::Bind {
                address: server_addr.to_string(),
                source: listener_err,
            });
        }
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server is bound to all interfaces; ensure firewall rules are properly configured"
        );
    }

    let drain_timeout = server_config.shutdown_timeout();
    let draining = Arc::new(Notify::new());
    let drain_started = Arc::clone(&draining);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal(drain_timeout).await;
        drain_started.notify_one();
    });

    serve_until_drained(server.into_future(), draining, drain_timeout).await?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        "server shut down gracefully"
    );

    Ok(())
}

/// Drives the server future, bounding the drain after shutdown begins.
///
/// Once `draining` is notified the server has stopped accepting connections
/// and is waiting on in-flight requests; that wait is capped at
/// `drain_timeout` so a stuck connection cannot block process exit.
async fn serve_until_drained<F>(
    server: F,
    draining: Arc<Notify>,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        joined = &mut server_task => flatten_join(joined),
        () = draining.notified() => {
            match tokio::time::timeout(drain_timeout, &mut server_task).await {
                Ok(joined) => flatten_join(joined),
                Err(_elapsed) => {
                    server_task.abort();
                    tracing::warn!(
                        target: TRACING_TARGET_SERVER_SHUTDOWN,
                        timeout_secs = drain_timeout.as_secs(),
                        "drain timeout expired, abandoning remaining connections"
                    );
                    Ok(())
                }
            }
        }
    }
}

/// Maps the joined server result into a [`ServerError`].
fn flatten_join(joined: std::result::Result<io::Result<()>, tokio::task::JoinError>) -> Result<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                "server encountered an error"
            );
            Err(ServerError::Runtime(err))
        }
        Err(join_err) => Err(ServerError::Runtime(io::Error::other(join_err))),
    }
}
