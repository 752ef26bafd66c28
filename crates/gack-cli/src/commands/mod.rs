//! CLI command definitions.

pub mod exec;
pub mod serve;
pub mod validate;
