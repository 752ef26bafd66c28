//! The parse, authenticate, route, invoke and render pipeline.

use std::fmt;
use std::sync::Arc;

use http::{header, HeaderValue, Request, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use gack_types::{HandlerError, SlashCommand};

use crate::credentials::CredentialSet;
use crate::error::DecodeError;
use crate::handler::Handler;
use crate::parser;

/// Body sent when a command carries an unknown token.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid API token. Check configuration.";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// How a single request ended.
///
/// Every variant renders to a response body; none of them maps to a
/// non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request was not valid form data.
    DecodeFailed(DecodeError),
    /// The token was not in the credential set.
    Unauthorized,
    /// No handler accepted the command.
    NoMatch,
    /// The selected handler replied (possibly with empty text).
    Replied(String),
    /// The selected handler failed.
    Failed(HandlerError),
}

impl Outcome {
    /// Renders the response body text for this outcome.
    pub fn body(&self) -> String {
        match self {
            Outcome::DecodeFailed(e) => e.to_string(),
            Outcome::Unauthorized => INVALID_TOKEN_MESSAGE.to_string(),
            Outcome::NoMatch => String::new(),
            Outcome::Replied(text) => text.clone(),
            Outcome::Failed(e) => e.to_string(),
        }
    }

    /// Consumes the outcome, returning the response body text.
    pub fn into_body(self) -> String {
        match self {
            Outcome::Replied(text) => text,
            other => other.body(),
        }
    }
}

impl From<Outcome> for Response<String> {
    fn from(outcome: Outcome) -> Self {
        let mut response = Response::new(outcome.into_body());
        *response.status_mut() = StatusCode::OK;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        response
    }
}

/// Routes slash commands to the first willing handler.
///
/// Built once with its tokens and handlers; both are read-only afterwards,
/// so a single dispatcher can be shared across concurrent requests behind
/// an `Arc` without locking.
pub struct Dispatcher {
    credentials: CredentialSet,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// `tokens` are the accepted shared secrets. Pass at least one, or every
    /// request will be rejected. `handlers` are tried in the given order.
    pub fn new<I, S>(tokens: I, handlers: Vec<Arc<dyn Handler>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_credentials(CredentialSet::new(tokens), handlers)
    }

    /// Creates a dispatcher from an existing credential set.
    pub fn with_credentials(credentials: CredentialSet, handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self {
            credentials,
            handlers,
        }
    }

    /// The accepted tokens.
    pub fn credentials(&self) -> &CredentialSet {
        &self.credentials
    }

    /// The registered handlers, in routing order.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Returns the index and handler selected for `command`, if any.
    pub fn route(&self, command: &SlashCommand) -> Option<(usize, &dyn Handler)> {
        self.handlers
            .iter()
            .enumerate()
            .find(|(_, h)| h.can_handle(command))
            .map(|(idx, h)| (idx, h.as_ref()))
    }

    /// Runs an already parsed command through authentication, routing and
    /// invocation.
    #[instrument(
        skip_all,
        fields(command = %command.command, team_id = %command.team_id)
    )]
    pub fn dispatch(&self, command: &SlashCommand) -> Outcome {
        if !self.credentials.authenticate(command) {
            warn!(user_id = %command.user_id, "Rejected command with unknown token");
            return Outcome::Unauthorized;
        }

        let Some((index, handler)) = self.route(command) else {
            debug!("No handler accepted the command");
            return Outcome::NoMatch;
        };
        debug!(index, handler = handler.name(), "Routing command");

        match handler.handle(command) {
            Ok(text) => Outcome::Replied(text),
            Err(e) => {
                info!(
                    handler = handler.name(),
                    kind = ?e.kind,
                    error = %e,
                    "Handler failed"
                );
                Outcome::Failed(e)
            }
        }
    }

    /// Runs the full pipeline for a buffered HTTP request.
    ///
    /// A decode failure stops before the credentials or handlers are
    /// consulted.
    pub fn serve<B: AsRef<[u8]>>(&self, request: &Request<B>) -> Outcome {
        match parser::parse_slash_command(request) {
            Ok(command) => self.dispatch(&command),
            Err(e) => {
                debug!(error = %e, kind = ?e.kind(), "Request is not valid form data");
                Outcome::DecodeFailed(e)
            }
        }
    }

    /// Runs the full pipeline and renders a plain-text `200 OK` response.
    ///
    /// This is the framework-neutral entry point: anything that can buffer
    /// a request body into an `http::Request` can serve slash commands.
    pub fn respond<B: AsRef<[u8]>>(&self, request: &Request<B>) -> Response<String> {
        self.serve(request).into()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("Dispatcher")
            .field("credentials", &self.credentials)
            .field("handlers", &names)
            .finish()
    }
}
