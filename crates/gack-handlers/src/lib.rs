//! # gack-handlers
//!
//! Ready-made handlers for the gack dispatcher, and a builder that turns
//! the `[[handlers]]` config list into a routing table.

pub mod clock;
pub mod echo;

use std::sync::Arc;

use gack_config::{HandlerConfig, HandlerKind};
use gack_dispatch::Handler;

pub use clock::ClockHandler;
pub use echo::EchoHandler;

/// Instantiates configured handlers, preserving their order.
pub fn build_handlers(configs: &[HandlerConfig]) -> Vec<Arc<dyn Handler>> {
    configs
        .iter()
        .map(|cfg| -> Arc<dyn Handler> {
            match cfg.kind {
                HandlerKind::Echo => Arc::new(EchoHandler::new(cfg.command.clone())),
                HandlerKind::Clock => Arc::new(ClockHandler::new(cfg.command.clone())),
            }
        })
        .collect()
}

/// Whether `command` passes an optional keyword filter.
pub(crate) fn matches_filter(filter: Option<&str>, command: &str) -> bool {
    filter.map_or(true, |keyword| keyword == command)
}
