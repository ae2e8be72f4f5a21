//! Ticket Orchestrator — fans one ticket out to six task agents.
//!
//! Flow: combined historical context (once) → six prompts → six independent
//! backend calls (run concurrently) → `task -> AgentResult` map.
//!
//! A failing task only affects its own entry; all six keys are always present.

use std::collections::BTreeMap;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::corpus::matcher::TicketContext;
use crate::corpus::Corpus;
use crate::errors::AppError;
use crate::llm_client::prompts::system_instruction;
use crate::llm_client::{AgentResult, Backend};
use crate::tickets::models::Ticket;
use crate::tickets::prompts::*;

/// The six analytical tasks. Serialized names are the result map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentTask {
    Summary,
    Actions,
    Routing,
    Sentiment,
    Recommendations,
    TimeEstimation,
}

impl AgentTask {
    pub const ALL: [AgentTask; 6] = [
        AgentTask::Summary,
        AgentTask::Actions,
        AgentTask::Routing,
        AgentTask::Sentiment,
        AgentTask::Recommendations,
        AgentTask::TimeEstimation,
    ];

    pub fn role(self) -> &'static str {
        match self {
            AgentTask::Summary => SUMMARY_ROLE,
            AgentTask::Actions => ACTIONS_ROLE,
            AgentTask::Routing => ROUTING_ROLE,
            AgentTask::Sentiment => SENTIMENT_ROLE,
            AgentTask::Recommendations => RECOMMENDATIONS_ROLE,
            AgentTask::TimeEstimation => TIME_ESTIMATION_ROLE,
        }
    }

    fn template(self) -> &'static str {
        match self {
            AgentTask::Summary => SUMMARY_PROMPT_TEMPLATE,
            AgentTask::Actions => ACTIONS_PROMPT_TEMPLATE,
            AgentTask::Routing => ROUTING_PROMPT_TEMPLATE,
            AgentTask::Sentiment => SENTIMENT_PROMPT_TEMPLATE,
            AgentTask::Recommendations => RECOMMENDATIONS_PROMPT_TEMPLATE,
            AgentTask::TimeEstimation => TIME_ESTIMATION_PROMPT_TEMPLATE,
        }
    }

    /// Only recommendation and time estimation see the historical context.
    pub fn uses_historical_context(self) -> bool {
        matches!(self, AgentTask::Recommendations | AgentTask::TimeEstimation)
    }

    pub fn build_prompt(self, ticket: &Ticket, historical_context: &str) -> String {
        let context = if self.uses_historical_context() {
            historical_context
        } else {
            ""
        };
        fill_template(
            self.template(),
            &[
                ("subject", ticket.subject.as_str()),
                ("description", ticket.description.as_str()),
                ("historical_context", context),
            ],
        )
    }
}

pub type TicketAnalysis = BTreeMap<AgentTask, AgentResult>;

/// Runs all six agents for `ticket` on `backend`.
///
/// Fails only when no ticket is given, and then before any backend call.
pub async fn analyze_ticket(
    ticket: Option<&Ticket>,
    corpus: &Corpus,
    backend: &Backend,
) -> Result<TicketAnalysis, AppError> {
    let ticket =
        ticket.ok_or_else(|| AppError::Validation("No ticket data provided".to_string()))?;

    let analysis_id = Uuid::new_v4();
    let span = info_span!(
        "analyze_ticket",
        %analysis_id,
        ticket_id = %ticket.id,
        provider = backend.provider_name(),
        model = %backend.model
    );

    async move {
        let context = TicketContext::build(corpus, &ticket.subject, &ticket.description);
        debug!(
            "{} keywords, {} historical cases, conversation: {:?}",
            context.keywords.len(),
            context.relevant_tickets.len(),
            context.relevant_conversation.map(|c| c.category.as_str())
        );
        let historical_context = context.render();

        let runs = AgentTask::ALL.into_iter().map(|task| {
            let prompt = task.build_prompt(ticket, &historical_context);
            let system = system_instruction(task.role());
            async move {
                let result = backend.invoke(&prompt, Some(&system)).await;
                debug!(?task, failed = result.is_error(), "Agent finished");
                (task, result)
            }
        });

        let analysis: TicketAnalysis = join_all(runs).await.into_iter().collect();

        let failed = analysis.values().filter(|r| r.is_error()).count();
        info!(
            "Ticket analysis complete: {} tasks, {} failed",
            analysis.len(),
            failed
        );

        Ok(analysis)
    }
    .instrument(span)
    .await
}

/// Single-pass `{key}` substitution. Inserted values are never rescanned,
/// and braces that are not a known placeholder are kept verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        for (key, value) in values {
            let placeholder = format!("{{{key}}}");
            if let Some(after) = tail.strip_prefix(placeholder.as_str()) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }

        out.push('{');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}
