//! The slash command model.

use serde::{Deserialize, Serialize};

/// Form keys carried by a slash command webhook, in wire order.
pub const FORM_FIELDS: [&str; 9] = [
    "channel_id",
    "channel_name",
    "command",
    "team_domain",
    "team_id",
    "text",
    "token",
    "user_id",
    "user_name",
];

/// A single slash command as typed by a user.
///
/// When a user runs a slash command the chat platform sends an HTTP request
/// carrying the entered text plus metadata about where it came from. Every
/// field is a plain string and defaults to empty when the request omits it;
/// only `token` is ever checked, and that happens after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SlashCommand {
    /// Identifier of the channel the command was issued in.
    pub channel_id: String,
    /// Display name of that channel.
    pub channel_name: String,
    /// The command keyword itself, e.g. `/weather`.
    pub command: String,
    /// Domain of the originating workspace.
    pub team_domain: String,
    /// Identifier of the originating workspace.
    pub team_id: String,
    /// Free text following the command keyword.
    pub text: String,
    /// Shared secret presented by the caller.
    pub token: String,
    /// Identifier of the invoking user.
    pub user_id: String,
    /// Name of the invoking user.
    pub user_name: String,
}

impl SlashCommand {
    /// Returns the value of a field by its form key, or `None` for unknown keys.
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "channel_id" => &self.channel_id,
            "channel_name" => &self.channel_name,
            "command" => &self.command,
            "team_domain" => &self.team_domain,
            "team_id" => &self.team_id,
            "text" => &self.text,
            "token" => &self.token,
            "user_id" => &self.user_id,
            "user_name" => &self.user_name,
            _ => return None,
        };
        Some(value)
    }

    /// Builds a command by looking up each form key through `lookup`.
    ///
    /// Keys for which `lookup` returns `None` become empty strings.
    pub fn from_lookup<'a, F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let mut get = |key: &str| lookup(key).unwrap_or_default().to_string();
        Self {
            channel_id: get("channel_id"),
            channel_name: get("channel_name"),
            command: get("command"),
            team_domain: get("team_domain"),
            team_id: get("team_id"),
            text: get("text"),
            token: get("token"),
            user_id: get("user_id"),
            user_name: get("user_name"),
        }
    }
}
