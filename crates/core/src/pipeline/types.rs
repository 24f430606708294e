//! Data types flowing through the scoring pipeline.

use serde::{Deserialize, Serialize};

/// A ticket that passed triage and is eligible for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Ticket number, unique within a client's record set.
    pub number: String,
    pub title: String,
    /// Priority label (Urgent/High/Normal/Low); "Normal" when absent.
    pub priority: String,
    /// Created timestamp in the upstream `%d.%m.%y %H:%M` format.
    pub created: String,
    /// Original message content from the requester.
    pub content: String,
    /// Response content; the leading token is a `%d.%m.%y` date.
    pub response: String,
    /// Days between creation and response, floored at 0; -1 when unknown.
    pub response_delay: i64,
}

/// A score as returned by the oracle: a 0-10 number, or a marker string
/// ("Error" for the synthetic batch-failure record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    pub fn error() -> Self {
        ScoreValue::Text("Error".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScoreValue::Text(_))
    }
}

/// One per-ticket result as parsed from the oracle's array output.
///
/// Every field is optional on the wire; missing pieces degrade to empty
/// defaults rather than failing the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTicketScore {
    #[serde(default)]
    pub ticket_number: String,
    #[serde(default = "ScoreValue::error")]
    pub ticket_score: ScoreValue,
    #[serde(default)]
    pub reason: String,
}

impl RawTicketScore {
    /// The sentinel record a failed batch contributes instead of results.
    pub fn batch_failure(batch_index: usize) -> Self {
        Self {
            ticket_number: format!("Batch-{}", batch_index + 1),
            ticket_score: ScoreValue::error(),
            reason: "Failed to parse batch response".to_string(),
        }
    }
}

/// A per-ticket result after reconciliation against the source batch.
///
/// Title and priority come from the stored ticket when the oracle's
/// `ticket_number` matched; unmatched records pass through without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTicket {
    pub ticket_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_priority: Option<String>,
    pub ticket_score: ScoreValue,
    pub reason: String,
}

impl ScoredTicket {
    /// Enrich an oracle record with the matching source ticket.
    pub fn reconciled(raw: RawTicketScore, ticket: &Ticket) -> Self {
        Self {
            ticket_number: raw.ticket_number,
            ticket_title: Some(ticket.title.clone()),
            ticket_priority: Some(ticket.priority.clone()),
            ticket_score: raw.ticket_score,
            reason: raw.reason,
        }
    }

    /// Pass an unmatched oracle record through verbatim.
    pub fn unmatched(raw: RawTicketScore) -> Self {
        Self {
            ticket_number: raw.ticket_number,
            ticket_title: None,
            ticket_priority: None,
            ticket_score: raw.ticket_score,
            reason: raw.reason,
        }
    }
}

/// Triage counts plus the ordered valid-ticket sequence.
#[derive(Debug, Clone, Default)]
pub struct Triage {
    pub total: usize,
    pub book_training: usize,
    pub no_response: usize,
    pub valid: Vec<Ticket>,
}

/// The pipeline's sole externally visible output. Built once, immutable
/// after construction.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub cnb_id: String,
    pub client_name: String,
    pub total_tickets: usize,
    pub book_training_tickets: usize,
    pub tickets_without_response: usize,
    pub overall_score: i64,
    pub ticket_details: Vec<ScoredTicket>,
}
