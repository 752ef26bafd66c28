//! A handler that tells the time in a named IANA time zone.

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use gack_dispatch::Handler;
use gack_types::{HandlerError, SlashCommand};

use crate::matches_filter;

/// `date(1)` style layout, e.g. `Mon Jan  2 15:04:05 MST 2006`.
const UNIX_DATE: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Replies with the current time in the zone named by the command text.
///
/// Blank text or `UTC` means UTC and `Local` means the server's own zone.
/// Any other text must be an IANA zone name such as `Europe/Dublin`.
#[derive(Debug, Clone)]
pub struct ClockHandler {
    command: Option<String>,
    now: fn() -> DateTime<Utc>,
}

impl ClockHandler {
    /// Creates a clock handler, optionally limited to one command keyword.
    pub fn new(command: Option<String>) -> Self {
        Self {
            command,
            now: Utc::now,
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, now: fn() -> DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

impl Default for ClockHandler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Handler for ClockHandler {
    fn name(&self) -> &str {
        "clock"
    }

    fn can_handle(&self, command: &SlashCommand) -> bool {
        matches_filter(self.command.as_deref(), &command.command)
    }

    fn handle(&self, command: &SlashCommand) -> Result<String, HandlerError> {
        let now = (self.now)();
        let zone = command.text.as_str();
        let formatted = match zone {
            "" | "UTC" => now.format(UNIX_DATE).to_string(),
            "Local" => now.with_timezone(&Local).format(UNIX_DATE).to_string(),
            name => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| HandlerError::invalid_input(format!("unknown time zone {name}")))?;
                now.with_timezone(&tz).format(UNIX_DATE).to_string()
            }
        };
        Ok(formatted)
    }
}
