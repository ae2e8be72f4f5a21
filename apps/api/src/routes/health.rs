use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::llm_client::LlmError;
use crate::state::AppState;

pub const ENDPOINTS: [&str; 5] = [
    "/status",
    "/historical-data",
    "/conversations",
    "/process-ticket",
    "/tickets",
];

/// GET /
/// Liveness check listing the available endpoints.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "AI Customer Support System Backend API is running",
        "endpoints": ENDPOINTS,
    }))
}

/// GET /status
/// Connectivity check against the default inference backend.
pub async fn status_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = state.providers.default_backend();
    let provider = backend.provider_name();

    match backend.provider.list_models().await {
        Ok(models) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "backend_connected": true,
                "provider": provider,
                "models": models,
                "historical_tickets": state.corpus.historical_tickets.len(),
                "conversations": state.corpus.conversations.len(),
            })),
        ),
        Err(LlmError::Api { status, message }) => {
            warn!("{provider} status check returned {status}: {message}");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "warning",
                    "backend_connected": false,
                    "provider": provider,
                    "message": message,
                })),
            )
        }
        Err(e) => {
            warn!("{provider} is unreachable: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "backend_connected": false,
                    "provider": provider,
                    "message": e.to_string(),
                })),
            )
        }
    }
}
