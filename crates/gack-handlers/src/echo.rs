//! A handler that repeats the command back to the user.

use gack_dispatch::Handler;
use gack_types::{HandlerError, SlashCommand};

use crate::matches_filter;

/// Replies with the command keyword followed by its text, reforming what
/// the user typed.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler {
    command: Option<String>,
}

impl EchoHandler {
    /// Creates an echo handler, optionally limited to one command keyword.
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

impl Handler for EchoHandler {
    fn name(&self) -> &str {
        "echo"
    }

    fn can_handle(&self, command: &SlashCommand) -> bool {
        matches_filter(self.command.as_deref(), &command.command)
    }

    fn handle(&self, command: &SlashCommand) -> Result<String, HandlerError> {
        Ok(format!("{} {}", command.command, command.text))
    }
}
