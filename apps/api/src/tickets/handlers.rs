//! Axum route handlers for ticket listing and analysis.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tickets::demo::unresolved_demo_tickets;
use crate::tickets::models::Ticket;
use crate::tickets::orchestrator::{analyze_ticket, TicketAnalysis};

#[derive(Debug, Deserialize)]
pub struct ProcessTicketRequest {
    pub ticket: Option<Ticket>,
    /// Provider name, `provider:model`, or a model name for the default provider.
    pub model: Option<String>,
}

/// GET /tickets
///
/// Historical records as tickets, followed by the open demo tickets.
pub async fn handle_list_tickets(State(state): State<AppState>) -> Json<Vec<Ticket>> {
    let mut tickets: Vec<Ticket> = state
        .corpus
        .historical_tickets
        .iter()
        .map(Ticket::from_historical)
        .collect();
    tickets.extend(unresolved_demo_tickets(Utc::now()));
    Json(tickets)
}

/// POST /process-ticket
///
/// Runs the six ticket agents. A missing ticket or unreadable body is a 400
/// and never reaches a backend.
pub async fn handle_process_ticket(
    State(state): State<AppState>,
    payload: Result<Json<ProcessTicketRequest>, JsonRejection>,
) -> Result<Json<TicketAnalysis>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let backend = state.providers.resolve(request.model.as_deref());
    let analysis = analyze_ticket(request.ticket.as_ref(), &state.corpus, &backend).await?;
    Ok(Json(analysis))
}
