//! Shared helpers used across CLI commands.
//!
//! Centralises turning a loaded configuration into a ready `Dispatcher`,
//! and printing configuration diagnostics the same way everywhere.

use gack_config::{ConfigError, GackConfig};
use gack_dispatch::Dispatcher;
use gack_handlers::build_handlers;
use gack_types::DiagnosticError;

use crate::output;

/// Unwraps a loaded configuration, printing diagnostics on failure.
///
/// # Errors
///
/// Returns an error if the configuration failed to load.
pub fn require_config(loaded: Result<GackConfig, ConfigError>) -> anyhow::Result<GackConfig> {
    loaded.map_err(|e| {
        report(&e);
        anyhow::anyhow!("{e}")
    })
}

/// Validates `config`, printing each warning.
///
/// # Errors
///
/// Returns an error if the configuration is unusable.
pub fn check_config(config: &GackConfig) -> anyhow::Result<Vec<String>> {
    let warnings = config.validate().map_err(|e| {
        report(&e);
        anyhow::anyhow!("{e}")
    })?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    Ok(warnings)
}

/// Builds the dispatcher described by `config`.
pub fn build_dispatcher(config: &GackConfig) -> Dispatcher {
    Dispatcher::new(
        config.auth.tokens.iter().cloned(),
        build_handlers(&config.handlers),
    )
}

fn report(e: &ConfigError) {
    output::print_error(&e.to_string());
    if let Some(hint) = e.hint() {
        eprintln!("\n  Cause: {hint}");
    }
    if let Some(fix) = e.fix() {
        eprintln!("  Fix:   {fix}\n");
    }
}
