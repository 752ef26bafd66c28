//! Error types for the HTTP transport layer.

use thiserror::Error;

/// Errors that can occur in the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The command path cannot be routed.
    #[error("invalid command path '{0}': must start with '/' and not be {}", crate::HEALTH_PATH)]
    InvalidPath(String),
    /// The HTTP server encountered an I/O error while serving.
    #[error("server error: {0}")]
    Serve(String),
}
