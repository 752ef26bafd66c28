//! gack CLI - slash-command webhook server.

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod input;
mod output;
pub(crate) mod shared;

/// gack - route chat slash commands to handlers over HTTP.
#[derive(Debug, Parser)]
#[command(name = "gack", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv). Overrides `logging.level`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve slash commands over HTTP.
    Serve(commands::serve::ServeArgs),
    /// Dispatch one form-encoded command locally and print the reply.
    Exec(commands::exec::ExecArgs),
    /// Check the configuration and report problems.
    Validate(commands::validate::ValidateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = gack_config::load_config(cli.config.as_deref());

    // Initialize tracing.
    let filter = match cli.verbose {
        0 => loaded
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    };

    tracing::debug!("gack starting with config: {:?}", cli.config);

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, loaded).await,
        Commands::Exec(args) => commands::exec::execute(args, loaded),
        Commands::Validate(args) => commands::validate::execute(args, loaded),
    }
}
