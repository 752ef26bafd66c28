//! `gack exec` command.
//!
//! Dispatches a single form-encoded request through the configured
//! handlers without starting a server. Handy for checking a setup.

use clap::Args;
use http::{header, Method, Request};

use gack_config::{ConfigError, GackConfig};
use gack_dispatch::Outcome;

use crate::{input, output, shared};

/// Dispatch one slash command locally.
#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Form-encoded request body, e.g. `token=aaa&command=%2Fecho&text=hi`.
    pub form: Option<String>,
    /// Read the body from a file instead (`-` for stdin).
    #[arg(short = 'f', long)]
    pub input_file: Option<String>,
}

/// Executes the exec command.
pub fn execute(args: &ExecArgs, loaded: Result<GackConfig, ConfigError>) -> anyhow::Result<()> {
    let config = shared::require_config(loaded)?;
    shared::check_config(&config)?;
    let body = input::resolve_form(args.form.as_deref(), args.input_file.as_deref())?;

    let request = form_request(body)?;
    let dispatcher = shared::build_dispatcher(&config);
    let outcome = dispatcher.serve(&request);

    match outcome {
        Outcome::Replied(text) => println!("{text}"),
        Outcome::NoMatch => output::print_warning("no handler accepted the command"),
        other => {
            output::print_error(&other.into_body());
            anyhow::bail!("command was not handled");
        }
    }
    Ok(())
}

fn form_request(body: String) -> anyhow::Result<Request<String>> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body)
        .map_err(|e| anyhow::anyhow!("failed to build request: {e}"))
}
