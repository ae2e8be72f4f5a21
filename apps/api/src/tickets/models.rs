use serde::{Deserialize, Serialize};

use crate::corpus::HistoricalTicketRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A support ticket as sent by the frontend. Read-only once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default)]
    pub id: String,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_resolution: Option<String>,
}

impl Ticket {
    /// Ticket view of a historical CSV row, as listed by `GET /tickets`.
    pub fn from_historical(record: &HistoricalTicketRecord) -> Self {
        let resolved = record
            .get("Resolution Status")
            .is_some_and(|s| s.eq_ignore_ascii_case("resolved"));

        Ticket {
            id: record.get("Ticket ID").unwrap_or("Unknown").to_string(),
            subject: record.get("Issue Category").unwrap_or("No Subject").to_string(),
            description: record.get("Solution").unwrap_or("No Description").to_string(),
            customer_name: "Historical Data".to_string(),
            customer_email: "historical@example.com".to_string(),
            created_at: record
                .get("Date of Resolution")
                .unwrap_or("Unknown Date")
                .to_string(),
            status: if resolved {
                TicketStatus::Resolved
            } else {
                TicketStatus::New
            },
            priority: None,
            assigned_to: None,
            estimated_resolution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticket_deserializes_camel_case_with_defaults() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": "T1",
            "subject": "Payment gateway error",
            "description": "card declined",
            "customerName": "Alice",
            "status": "in-progress",
            "priority": "high"
        }))
        .unwrap();
        assert_eq!(ticket.customer_name, "Alice");
        assert_eq!(ticket.customer_email, "");
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.priority, Some(Priority::High));
    }

    #[test]
    fn test_ticket_requires_subject_and_description() {
        assert!(serde_json::from_value::<Ticket>(json!({ "id": "T1" })).is_err());
    }

    #[test]
    fn test_historical_record_maps_to_ticket_view() {
        let record: HistoricalTicketRecord = [
            ("Ticket ID", "TECH_001"),
            ("Issue Category", "Login Failure"),
            ("Solution", "Reset password"),
            ("Resolution Status", "RESOLVED"),
            ("Date of Resolution", "2024-02-01"),
        ]
        .into_iter()
        .collect();

        let ticket = Ticket::from_historical(&record);
        assert_eq!(ticket.id, "TECH_001");
        assert_eq!(ticket.subject, "Login Failure");
        assert_eq!(ticket.description, "Reset password");
        assert_eq!(ticket.created_at, "2024-02-01");
        assert_eq!(ticket.status, TicketStatus::Resolved);
    }

    #[test]
    fn test_sparse_record_uses_placeholders() {
        let ticket = Ticket::from_historical(&HistoricalTicketRecord::default());
        assert_eq!(ticket.id, "Unknown");
        assert_eq!(ticket.subject, "No Subject");
        assert_eq!(ticket.description, "No Description");
        assert_eq!(ticket.created_at, "Unknown Date");
        assert_eq!(ticket.status, TicketStatus::New);

        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["customerEmail"], "historical@example.com");
        assert_eq!(value["status"], "new");
        assert!(value.get("priority").is_none());
    }
}
