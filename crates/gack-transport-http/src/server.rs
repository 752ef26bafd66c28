//! HTTP server that binds the command router to a TCP socket.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use gack_dispatch::Dispatcher;

use crate::error::HttpTransportError;
use crate::router::{build_router, validate_path, AppState};

/// Axum-based HTTP server for slash commands.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) path: String,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a new HTTP server serving commands on `/`.
    ///
    /// # Arguments
    ///
    /// * `dispatcher` - shared command dispatcher
    /// * `addr` - socket address to listen on
    pub fn new(dispatcher: Arc<Dispatcher>, addr: SocketAddr) -> Self {
        Self {
            addr,
            path: "/".to_string(),
            state: AppState { dispatcher },
        }
    }

    /// Serves commands on `path` instead of `/`.
    ///
    /// # Errors
    ///
    /// Returns `HttpTransportError::InvalidPath` if the path cannot be routed.
    pub fn with_path(mut self, path: impl Into<String>) -> Result<Self, HttpTransportError> {
        let path = path.into();
        validate_path(&path)?;
        self.path = path;
        Ok(self)
    }

    /// The address the server will bind to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        self.run_until(std::future::pending()).await
    }

    /// Starts the server and shuts down gracefully once `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), HttpTransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener =
            TcpListener::bind(self.addr)
                .await
                .map_err(|e| HttpTransportError::Bind {
                    addr: self.addr.to_string(),
                    source: e,
                })?;
        let local = listener.local_addr().unwrap_or(self.addr);

        tracing::info!(
            addr = %local,
            path = %self.path,
            handlers = self.state.dispatcher.handlers().len(),
            "gack HTTP server ready"
        );

        let router = build_router(self.state, &self.path)?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        Ok(())
    }
}
