//! # gack-types
//!
//! Domain types for the gack slash-command dispatcher.
//! This crate contains pure data types with zero external dependencies
//! (except serde for serialization).

pub mod command;
pub mod error;

// Re-exports for convenience.
pub use command::SlashCommand;
pub use error::{DiagnosticError, ErrorKind, HandlerError};
