//! Context Matcher — picks historical tickets and one example conversation
//! that share keywords with a new ticket, and renders them as prompt context.
//!
//! Matching is plain substring containment against lower-cased category
//! names. No stemming, no deduplication, no weighting. Unrelated categories
//! that happen to contain a keyword will match.

use crate::corpus::{ConversationExample, Corpus, HistoricalTicketRecord};

/// Keywords shorter than or equal to this many characters are discarded.
const MIN_KEYWORD_CHARS: usize = 3;

/// At most this many historical cases are carried into the context block.
pub const MAX_RELEVANT_TICKETS: usize = 3;

const ISSUE_CATEGORY: &str = "Issue Category";

// ────────────────────────────────────────────────────────────────────────────
// Match result
// ────────────────────────────────────────────────────────────────────────────

/// Everything the corpus offers for one ticket. Borrowed from the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketContext<'a> {
    pub keywords: Vec<String>,
    /// Corpus order, capped at `MAX_RELEVANT_TICKETS`.
    pub relevant_tickets: Vec<&'a HistoricalTicketRecord>,
    pub relevant_conversation: Option<&'a ConversationExample>,
}

impl<'a> TicketContext<'a> {
    pub fn build(corpus: &'a Corpus, subject: &str, description: &str) -> Self {
        let keywords = extract_keywords(subject, description);
        let relevant_tickets = find_relevant_tickets(&corpus.historical_tickets, &keywords);
        let relevant_conversation = find_relevant_conversation(corpus.conversations.iter(), &keywords);

        Self {
            keywords,
            relevant_tickets,
            relevant_conversation,
        }
    }

    /// Renders the combined context block. Empty when nothing matched.
    pub fn render(&self) -> String {
        let mut combined = String::new();

        if !self.relevant_tickets.is_empty() {
            combined.push_str("Historical similar cases:\n");
            for ticket in &self.relevant_tickets {
                combined.push_str(&format!(
                    "Case #{}: {} ({}). Solution: {}. Priority: {}.\n",
                    field(ticket, "Ticket ID", "Unknown"),
                    field(ticket, ISSUE_CATEGORY, "Unknown issue"),
                    field(ticket, "Sentiment", "Unknown sentiment"),
                    field(ticket, "Solution", "No solution recorded"),
                    field(ticket, "Priority", "Unknown priority"),
                ));
            }
        }

        if let Some(conversation) = self.relevant_conversation {
            if !conversation.text.is_empty() {
                combined.push_str("\nRelated conversation example:\n");
                combined.push_str(&conversation.text);
            }
        }

        combined
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matching steps
// ────────────────────────────────────────────────────────────────────────────

/// Lower-cased whitespace tokens of subject then description, longer than 3 chars.
pub fn extract_keywords(subject: &str, description: &str) -> Vec<String> {
    subject
        .split_whitespace()
        .chain(description.split_whitespace())
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() > MIN_KEYWORD_CHARS)
        .collect()
}

/// Records whose lower-cased issue category contains any keyword.
pub fn find_relevant_tickets<'a>(
    records: &'a [HistoricalTicketRecord],
    keywords: &[String],
) -> Vec<&'a HistoricalTicketRecord> {
    records
        .iter()
        .filter(|record| {
            let category = record.get(ISSUE_CATEGORY).unwrap_or_default().to_lowercase();
            keywords.iter().any(|kw| category.contains(kw.as_str()))
        })
        .take(MAX_RELEVANT_TICKETS)
        .collect()
}

/// The conversation whose category contains the most keyword occurrences.
/// Ties keep the earlier one; a zero count never selects anything.
pub fn find_relevant_conversation<'a>(
    conversations: impl IntoIterator<Item = &'a ConversationExample>,
    keywords: &[String],
) -> Option<&'a ConversationExample> {
    let mut best: Option<&'a ConversationExample> = None;
    let mut best_count = 0;

    for conversation in conversations {
        let category = conversation.category.to_lowercase();
        let count = keywords
            .iter()
            .filter(|kw| category.contains(kw.as_str()))
            .count();
        if count > best_count {
            best_count = count;
            best = Some(conversation);
        }
    }

    best
}

fn field<'a>(record: &'a HistoricalTicketRecord, key: &str, placeholder: &'a str) -> &'a str {
    record.get(key).unwrap_or(placeholder)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
