//! Input resolution for `gack exec`.
//!
//! Supports three input sources:
//! - Inline form data as a positional argument
//! - A file via `--input-file` / `-f`
//! - Stdin via `--input-file -`

use std::io::Read;
use std::path::Path;

/// Resolves the form-encoded request body from CLI arguments.
///
/// Priority: `--input-file` takes precedence over the inline argument.
/// Trailing newlines are stripped so files written by editors work as-is.
///
/// # Errors
///
/// Returns an error if no source is given or the source cannot be read.
pub fn resolve_form(inline: Option<&str>, input_file: Option<&str>) -> anyhow::Result<String> {
    let raw = match (input_file, inline) {
        (Some("-"), _) => read_from_stdin()?,
        (Some(path), _) => read_from_file(path)?,
        (None, Some(form)) => form.to_string(),
        (None, None) => anyhow::bail!("no form data given: pass it inline or with --input-file"),
    };
    Ok(raw.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads form data from a file path.
fn read_from_file(path: &str) -> anyhow::Result<String> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("input file not found: {path}");
    }
    std::fs::read_to_string(file_path).map_err(|e| anyhow::anyhow!("failed to read input file: {e}"))
}

/// Reads form data from stdin.
fn read_from_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
    Ok(buffer)
}
