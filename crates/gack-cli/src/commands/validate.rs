//! `gack validate` command.

use clap::Args;

use gack_config::{ConfigError, GackConfig};

use crate::{output, shared};

/// Check the configuration.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Executes the validate command.
pub fn execute(args: &ValidateArgs, loaded: Result<GackConfig, ConfigError>) -> anyhow::Result<()> {
    let config = shared::require_config(loaded)?;
    let warnings = shared::check_config(&config)?;
    for warning in &warnings {
        output::print_warning(warning);
    }
    if args.strict && !warnings.is_empty() {
        anyhow::bail!("{} warning(s) in strict mode", warnings.len());
    }

    let handlers: Vec<String> = config
        .handlers
        .iter()
        .map(|h| match &h.command {
            Some(cmd) => format!("{}({cmd})", h.kind),
            None => h.kind.to_string(),
        })
        .collect();
    output::print_success(&format!(
        "configuration valid: {}:{}{} with {} token(s), handlers [{}]",
        config.server.host,
        config.server.port,
        config.server.path,
        config.auth.tokens.len(),
        handlers.join(", ")
    ));
    Ok(())
}
