//! # gack-dispatch
//!
//! The request pipeline for slash commands (APPLICATION layer).
//!
//! A [`Dispatcher`] parses a form-encoded request into a
//! [`SlashCommand`](gack_types::SlashCommand), checks its token against a
//! [`CredentialSet`], and hands it to the first registered [`Handler`] that
//! accepts it. Every outcome renders to plain response text.

pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod handler;
mod media;
pub mod parser;

pub use credentials::CredentialSet;
pub use dispatcher::{Dispatcher, Outcome, INVALID_TOKEN_MESSAGE};
pub use error::DecodeError;
pub use form::FormData;
pub use handler::Handler;
pub use parser::{parse_form, parse_slash_command, reads_form_body, MAX_FORM_BODY};
