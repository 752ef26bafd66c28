//! The handler contract implemented by embedding applications.

use gack_types::{HandlerError, SlashCommand};

/// A unit that can answer slash commands.
///
/// The dispatcher asks each registered handler in turn whether it
/// [`can_handle`](Handler::can_handle) a command, and calls
/// [`handle`](Handler::handle) on the first one that says yes. Handlers
/// decide eligibility however they like: by command keyword, by team, or
/// unconditionally for a fall-through handler registered last.
///
/// Handlers are shared across concurrent requests and must not rely on
/// mutable state owned by the dispatcher.
pub trait Handler: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str {
        "handler"
    }

    /// Returns `true` if this handler should process `command`.
    ///
    /// Must be free of side effects; it may be called for commands the
    /// handler never ends up processing.
    fn can_handle(&self, command: &SlashCommand) -> bool;

    /// Processes `command` and produces the reply text.
    ///
    /// An `Err` is shown to the user as its message. `Ok(String::new())`
    /// means there is no immediate reply, for handlers that answer through
    /// some other channel.
    fn handle(&self, command: &SlashCommand) -> Result<String, HandlerError>;
}
