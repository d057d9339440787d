//! Suggestion relay server
//!
//! Keeps the completion-service credential on the server. `POST /` takes
//! `{userInput, conversationHistory, schemaDescription}` and answers with up to
//! three suggestions; any failure answers `500` with `[]`. `OPTIONS /` answers
//! CORS preflight probes and every other method gets `405`.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE,
};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use bytes::Bytes;

use crate::ai::provider::{CompletionBackend, RelayPayload, SuggestionRequest, suggest_via};
use crate::ai::suggestion::QueryOption;
use crate::error::AppError;

/// Shared handler state: the one upstream client for the process
#[derive(Clone)]
pub struct RelayState {
    backend: Arc<dyn CompletionBackend>,
}

/// Build the relay router around an upstream completion backend
pub fn router(backend: Arc<dyn CompletionBackend>) -> Router {
    Router::new()
        .route("/", post(suggest).options(preflight))
        .with_state(RelayState { backend })
}

/// Bind `addr` and serve the relay until the task is dropped
pub async fn serve(addr: &str, backend: Arc<dyn CompletionBackend>) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "Relay listening on {} (upstream: {})",
        listener.local_addr()?,
        backend.provider_name()
    );

    axum::serve(listener, router(backend))
        .await
        .map_err(|e| AppError::Relay(e.to_string()))
}

async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
        .into_response()
}

async fn suggest(State(state): State<RelayState>, body: Bytes) -> Response {
    let payload: RelayPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Relay rejected request body: {}", e);
            return options_response(StatusCode::INTERNAL_SERVER_ERROR, Vec::new());
        }
    };

    log::info!(
        "Relay request: {} chars, {} history messages",
        payload.user_input.chars().count(),
        payload.conversation_history.len()
    );

    let request = SuggestionRequest {
        input: payload.user_input,
        history: payload.conversation_history,
        schema: Arc::from(payload.schema_description),
    };

    match suggest_via(state.backend.as_ref(), &request).await {
        Ok(options) => options_response(StatusCode::OK, options),
        Err(e) => {
            log::warn!("Relay upstream failure: {}", e);
            options_response(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
        }
    }
}

fn options_response(status: StatusCode, options: Vec<QueryOption>) -> Response {
    (status, [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(options)).into_response()
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod relay_tests;
