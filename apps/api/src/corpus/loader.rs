//! Corpus loading. Any failure degrades to an empty collection so the service
//! keeps answering without historical context.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::corpus::{ConversationExample, Conversations, Corpus, HistoricalTicketRecord};

pub const HISTORICAL_TICKETS_FILE: &str = "Historical_ticket_data.csv";
pub const CONVERSATION_DIR: &str = "Conversation";

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Conversation directory not found: {0}")]
    MissingDirectory(PathBuf),
}

/// Loads both halves of the corpus from `data_dir`.
pub fn load_corpus(data_dir: &Path) -> Corpus {
    let historical_tickets = load_historical_tickets(&data_dir.join(HISTORICAL_TICKETS_FILE));
    let conversations = load_conversations(&data_dir.join(CONVERSATION_DIR));

    info!(
        "Loaded {} historical tickets and {} conversations from {}",
        historical_tickets.len(),
        conversations.len(),
        data_dir.display()
    );
    if historical_tickets.is_empty() && conversations.is_empty() {
        warn!("No historical context available; prompts will run without it");
    }

    Corpus::new(historical_tickets, conversations)
}

/// Reads the historical ticket CSV. Returns an empty list on any error.
pub fn load_historical_tickets(path: &Path) -> Vec<HistoricalTicketRecord> {
    read_historical_tickets(path).unwrap_or_else(|e| {
        warn!("Error loading historical tickets: {e}");
        Vec::new()
    })
}

/// Reads every `*.txt` file in `dir`, in file-name order. Returns an empty set on any error.
pub fn load_conversations(dir: &Path) -> Conversations {
    read_conversations(dir).unwrap_or_else(|e| {
        warn!("Error loading conversations: {e}");
        Conversations::default()
    })
}

fn read_historical_tickets(path: &Path) -> Result<Vec<HistoricalTicketRecord>, CorpusError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|row| -> Result<HistoricalTicketRecord, CorpusError> {
            let row = row?;
            Ok(headers
                .iter()
                .zip(row.iter())
                .map(|(key, value)| (key.trim(), value.trim()))
                .collect())
        })
        .collect()
}

fn read_conversations(dir: &Path) -> Result<Conversations, CorpusError> {
    if !dir.is_dir() {
        return Err(CorpusError::MissingDirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| -> Result<ConversationExample, CorpusError> {
            let text = fs::read_to_string(&path).map_err(io_error(&path))?;
            let category = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(ConversationExample { category, text })
        })
        .collect()
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CorpusError {
    let path = path.to_path_buf();
    move |source| CorpusError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CSV_FIXTURE: &str = "\
Ticket ID , Issue Category ,Sentiment,Priority,Solution,Resolution Status,Date of Resolution
TECH_001,  Payment Gateway Error ,Frustrated,High,Reset the gateway token,Resolved,2024-01-02
TECH_002,Login Failure,Neutral,Low,\"Cleared cache, re-logged\",Pending,2024-01-03
";

    fn write_fixture(dir: &TempDir) {
        fs::write(dir.path().join(HISTORICAL_TICKETS_FILE), CSV_FIXTURE).unwrap();
        let conv = dir.path().join(CONVERSATION_DIR);
        fs::create_dir(&conv).unwrap();
        fs::write(conv.join("Payment Issue.txt"), "Customer: my card failed").unwrap();
        fs::write(conv.join("Account Access.txt"), "Customer: locked out").unwrap();
        fs::write(conv.join("notes.md"), "ignored").unwrap();
    }

    #[test]
    fn test_loads_records_with_trimmed_keys_and_values() {
        let dir = TempDir::new().unwrap();
        write_fixture(&dir);

        let records = load_historical_tickets(&dir.path().join(HISTORICAL_TICKETS_FILE));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Ticket ID"), Some("TECH_001"));
        assert_eq!(records[0].get("Issue Category"), Some("Payment Gateway Error"));
        assert_eq!(records[1].get("Solution"), Some("Cleared cache, re-logged"));
    }

    #[test]
    fn test_missing_csv_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        assert!(load_historical_tickets(&dir.path().join("absent.csv")).is_empty());
    }

    #[test]
    fn test_malformed_csv_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HISTORICAL_TICKETS_FILE);
        fs::write(&path, "Ticket ID,Issue Category\nT1,Billing,extra,columns\n").unwrap();
        assert!(load_historical_tickets(&path).is_empty());
    }

    #[test]
    fn test_conversations_keyed_by_stem_in_name_order() {
        let dir = TempDir::new().unwrap();
        write_fixture(&dir);

        let conversations = load_conversations(&dir.path().join(CONVERSATION_DIR));
        let categories: Vec<&str> = conversations.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["Account Access", "Payment Issue"]);
        assert_eq!(
            conversations.iter().next().map(|c| c.text.as_str()),
            Some("Customer: locked out")
        );
    }

    #[test]
    fn test_missing_conversation_dir_yields_empty_set() {
        let dir = TempDir::new().unwrap();
        assert!(load_conversations(&dir.path().join(CONVERSATION_DIR)).is_empty());
    }

    #[test]
    fn test_load_corpus_on_empty_dir_is_usable() {
        let dir = TempDir::new().unwrap();
        let corpus = load_corpus(dir.path());
        assert!(corpus.historical_tickets.is_empty());
        assert!(corpus.conversations.is_empty());
    }
}
