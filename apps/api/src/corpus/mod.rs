// Historical corpus: past tickets from CSV and example conversations from
// text files. Built once at startup and shared read-only through AppState.

pub mod handlers;
pub mod loader;
pub mod matcher;

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One row of the historical ticket table, keys and values trimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistoricalTicketRecord(BTreeMap<String, String>);

impl HistoricalTicketRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HistoricalTicketRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A named example conversation. The category comes from the file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationExample {
    pub category: String,
    pub text: String,
}

/// Conversation examples in load order. Serializes as a `category -> text` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversations(Vec<ConversationExample>);

impl Conversations {
    pub fn iter(&self) -> impl Iterator<Item = &ConversationExample> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ConversationExample> for Conversations {
    fn from_iter<I: IntoIterator<Item = ConversationExample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Conversations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for example in &self.0 {
            map.serialize_entry(&example.category, &example.text)?;
        }
        map.end()
    }
}

/// Everything the matcher and the ticket endpoints read from disk.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub historical_tickets: Vec<HistoricalTicketRecord>,
    pub conversations: Conversations,
}

impl Corpus {
    pub fn new(
        historical_tickets: Vec<HistoricalTicketRecord>,
        conversations: Conversations,
    ) -> Self {
        Self {
            historical_tickets,
            conversations,
        }
    }
}
