//! Server lifecycle error types.

use std::io;

/// The error type for server startup and runtime failures.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration rejected before the listener was opened.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not bind to the requested address.
    #[error("failed to bind to {address}: {source}")]
    Bind {
        /// Address the server attempted to bind.
        address: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The server failed while processing connections.
    #[error("server runtime error: {0}")]
    Runtime(#[from] io::Error),
}

/// A specialized [`Result`] type for server lifecycle operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
