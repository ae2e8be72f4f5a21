use axum::{extract::State, Json};

use crate::corpus::{Conversations, HistoricalTicketRecord};
use crate::state::AppState;

/// GET /historical-data
pub async fn handle_historical_data(
    State(state): State<AppState>,
) -> Json<Vec<HistoricalTicketRecord>> {
    Json(state.corpus.historical_tickets.clone())
}

/// GET /conversations
pub async fn handle_conversations(State(state): State<AppState>) -> Json<Conversations> {
    Json(state.corpus.conversations.clone())
}
