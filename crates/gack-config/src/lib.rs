//! # gack-config
//!
//! Configuration management for gack.
//! Supports layered config: defaults -> file -> env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, LEGACY_TOKEN_ENV};
pub use schema::{GackConfig, HandlerConfig, HandlerKind};
