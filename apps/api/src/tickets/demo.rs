use chrono::{DateTime, Utc};

use crate::tickets::models::{Ticket, TicketStatus};

/// Open tickets listed alongside the historical ones so the dashboard
/// always has something to analyze.
pub fn unresolved_demo_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let created_at = now.to_rfc3339();
    let demo = |id: &str, subject: &str, description: &str, name: &str, email: &str| Ticket {
        id: id.to_string(),
        subject: subject.to_string(),
        description: description.to_string(),
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        created_at: created_at.clone(),
        status: TicketStatus::New,
        priority: None,
        assigned_to: None,
        estimated_resolution: None,
    };

    vec![
        demo(
            "T006",
            "Payment gateway error",
            "Unable to process payment for the subscription.",
            "Alice Brown",
            "alice.brown@example.com",
        ),
        demo(
            "T007",
            "Feature request: Multi-language support",
            "Requesting support for multiple languages in the app.",
            "Carlos Garcia",
            "carlos.garcia@example.com",
        ),
        demo(
            "T008",
            "App crashes on startup",
            "The app crashes immediately after launching on Android devices.",
            "Diana Evans",
            "diana.evans@example.com",
        ),
    ]
}
