//! Configuration schema types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::loader::ConfigError;

/// Path reserved for the liveness probe.
const HEALTH_PATH: &str = "/health";

/// Top-level gack configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GackConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Accepted shared-secret tokens.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Handlers to register, in routing order.
    #[serde(default = "default_handlers")]
    pub handlers: Vec<HandlerConfig>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GackConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            handlers: default_handlers(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_handlers() -> Vec<HandlerConfig> {
    vec![HandlerConfig::new(HandlerKind::Echo)]
}

impl GackConfig {
    /// Checks the configuration for mistakes.
    ///
    /// Returns human-readable warnings for settings that are legal but
    /// probably unintended: no tokens, a blank token, no handlers, or
    /// handlers that can never be reached.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for settings the server cannot run
    /// with, such as a command path that does not start with `/`.
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        let path = &self.server.path;
        if !path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "server.path '{path}' must start with '/'"
            )));
        }
        if path == HEALTH_PATH {
            return Err(ConfigError::Invalid(format!(
                "server.path cannot be {HEALTH_PATH}, it is reserved for the health probe"
            )));
        }
        for (idx, handler) in self.handlers.iter().enumerate() {
            if let Some(cmd) = &handler.command {
                if !cmd.starts_with('/') {
                    return Err(ConfigError::Invalid(format!(
                        "handlers[{idx}].command '{cmd}' must start with '/'"
                    )));
                }
            }
        }

        let mut warnings = Vec::new();
        if self.auth.tokens.is_empty() {
            warnings.push("auth.tokens is empty: every command will be rejected".to_string());
        } else if self.auth.tokens.iter().any(String::is_empty) {
            warnings.push("auth.tokens contains an empty token: unauthenticated commands are accepted".to_string());
        }
        if self.handlers.is_empty() {
            warnings.push("no handlers configured: every command gets an empty reply".to_string());
        }

        let mut seen = HashSet::new();
        for (idx, handler) in self.handlers.iter().enumerate() {
            match &handler.command {
                None if idx + 1 < self.handlers.len() => {
                    warnings.push(format!(
                        "handlers[{idx}] ({}) accepts every command; the {} handler(s) after it are unreachable",
                        handler.kind,
                        self.handlers.len() - idx - 1
                    ));
                    break;
                }
                None => {}
                Some(cmd) => {
                    if !seen.insert(cmd.as_str()) {
                        warnings.push(format!(
                            "handlers[{idx}] ({}) is unreachable: {cmd} is claimed by an earlier handler",
                            handler.kind
                        ));
                    }
                }
            }
        }

        Ok(warnings)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path the command endpoint is mounted on.
    #[serde(default = "default_path")]
    pub path: String,
}

impl ServerConfig {
    /// Resolves `host:port` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the host cannot be resolved.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = |reason: String| {
            ConfigError::Invalid(format!(
                "cannot resolve server address {}:{}: {reason}",
                self.host, self.port
            ))
        };
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no addresses found".to_string()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_path() -> String {
    "/".to_string()
}

/// Authentication settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Tokens accepted from the chat platform.
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// Built-in handler implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Replies with the command and its text.
    Echo,
    /// Replies with the current time in a named time zone.
    Clock,
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerKind::Echo => f.write_str("echo"),
            HandlerKind::Clock => f.write_str("clock"),
        }
    }
}

/// One entry of the `[[handlers]]` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerConfig {
    /// Which implementation to register.
    pub kind: HandlerKind,
    /// Only accept this command keyword (e.g. `/time`). `None` accepts all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl HandlerConfig {
    /// A handler of `kind` accepting every command.
    pub fn new(kind: HandlerKind) -> Self {
        Self {
            kind,
            command: None,
        }
    }

    /// Restricts the handler to one command keyword.
    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "gack_dispatch=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
