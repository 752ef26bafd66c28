//! `gack serve` command.
//!
//! Starts the HTTP server and routes incoming slash commands to the
//! configured handlers until interrupted.

use std::sync::Arc;

use clap::Args;

use gack_transport_http::HttpServer;

use crate::shared;

/// Start the slash-command HTTP server.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to listen on (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
    /// Path that receives commands (overrides `server.path`).
    #[arg(long)]
    pub path: Option<String>,
    /// Extra accepted token. Repeat to add several.
    #[arg(long = "token")]
    pub tokens: Vec<String>,
}

/// Executes the serve command.
pub async fn execute(
    args: &ServeArgs,
    loaded: Result<gack_config::GackConfig, gack_config::ConfigError>,
) -> anyhow::Result<()> {
    let mut config = shared::require_config(loaded)?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(path) = &args.path {
        config.server.path = path.clone();
    }
    for token in &args.tokens {
        if !config.auth.tokens.contains(token) {
            config.auth.tokens.push(token.clone());
        }
    }
    shared::check_config(&config)?;

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let dispatcher = Arc::new(shared::build_dispatcher(&config));
    let server = HttpServer::new(dispatcher, addr)
        .with_path(config.server.path.clone())
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    server
        .run_until(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;

    Ok(())
}
