// Ticket analysis: incoming ticket model, per-task prompts, the six-agent
// orchestrator and the HTTP handlers in front of it.
// All backend calls go through llm_client.

pub mod demo;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
