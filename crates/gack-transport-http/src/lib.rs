//! HTTP transport adapter for gack.
//! Serves slash commands on a configurable path (default `POST /`).

mod error;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use router::{build_router, AppState, HEALTH_PATH};
pub use server::HttpServer;
