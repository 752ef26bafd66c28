//! Axum router for the slash-command endpoint.
//! Routes: the command path (any method, default `/`) and `GET /health`.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{self, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use http_body_util::LengthLimitError;
use serde_json::json;

use gack_dispatch::{reads_form_body, DecodeError, Dispatcher, Outcome, MAX_FORM_BODY};

use crate::error::HttpTransportError;

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The slash-command dispatcher.
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the axum `Router` serving slash commands on `path`.
///
/// # Errors
///
/// Returns `HttpTransportError::InvalidPath` if `path` does not start with
/// `/` or collides with the health route.
pub fn build_router(state: AppState, path: &str) -> Result<Router, HttpTransportError> {
    validate_path(path)?;
    Ok(Router::new()
        .route(path, any(handle_command))
        .route(HEALTH_PATH, get(handle_health))
        .with_state(state))
}

pub(crate) fn validate_path(path: &str) -> Result<(), HttpTransportError> {
    if !path.starts_with('/') || path == HEALTH_PATH {
        return Err(HttpTransportError::InvalidPath(path.to_string()));
    }
    Ok(())
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "gack"}))
}

#[tracing::instrument(
    skip_all,
    fields(method = %request.method(), path = %request.uri().path())
)]
async fn handle_command(State(state): State<AppState>, request: Request) -> Response {
    let buffered = match buffer_request(request).await {
        Ok(r) => r,
        Err(e) => return render(Outcome::DecodeFailed(e)),
    };

    // Handlers are synchronous and may block, so keep them off the reactor.
    let dispatcher = Arc::clone(&state.dispatcher);
    match tokio::task::spawn_blocking(move || dispatcher.serve(&buffered)).await {
        Ok(outcome) => render(outcome),
        Err(e) => {
            tracing::error!(error = %e, "Handler task aborted");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Collects the request body so the dispatcher can parse it.
///
/// Bodies the dispatcher would ignore are dropped unread, so their size
/// never matters.
async fn buffer_request(request: Request) -> Result<http::Request<Bytes>, DecodeError> {
    let (parts, body) = request.into_parts();
    if !reads_form_body(&parts.method, &parts.headers) {
        return Ok(http::Request::from_parts(parts, Bytes::new()));
    }
    let bytes = axum::body::to_bytes(body, MAX_FORM_BODY + 1)
        .await
        .map_err(|e| {
            let inner = e.into_inner();
            if inner.is::<LengthLimitError>() {
                DecodeError::BodyTooLarge
            } else {
                DecodeError::BodyRead(inner.to_string())
            }
        })?;
    Ok(http::Request::from_parts(parts, bytes))
}

fn render(outcome: Outcome) -> Response {
    http::Response::<String>::from(outcome).map(Body::from)
}
