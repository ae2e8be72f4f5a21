pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::corpus::handlers as corpus_handlers;
use crate::errors::panic_response;
use crate::state::AppState;
use crate::tickets::handlers as ticket_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/status", get(health::status_handler))
        // Corpus (read-only, loaded at startup)
        .route(
            "/historical-data",
            get(corpus_handlers::handle_historical_data),
        )
        .route("/conversations", get(corpus_handlers::handle_conversations))
        // Tickets
        .route("/tickets", get(ticket_handlers::handle_list_tickets))
        .route(
            "/process-ticket",
            post(ticket_handlers::handle_process_ticket),
        )
        // Anything a handler did not anticipate still answers with a 500 body
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
