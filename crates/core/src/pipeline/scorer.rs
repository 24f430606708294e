//! Per-ticket batch scoring against the oracle.

use tracing::warn;

use crate::metrics;
use crate::oracle::ScoringOracle;

use super::parse::extract_array;
use super::types::{RawTicketScore, Ticket};

/// Build the deterministic scoring prompt for one batch.
///
/// Enumerates every ticket with its priority SLA context so the oracle can
/// penalize late or missing responses, and pins the exact JSON array shape
/// expected back.
pub(crate) fn build_batch_prompt(batch: &[Ticket]) -> String {
    let mut prompt = String::from(
        "Evaluate each of the following support tickets. Score each from 0 to 10 based on:\n\
         - Sentiment\n\
         - Relationship tone\n\
         - Support quality\n\
         - Priority + Response time\n\
         \n\
         Priority Rules:\n\
         - Urgent: 2 days\n\
         - High: 3 days\n\
         - Normal: 5 days\n\
         - Low: 7 days\n\
         \n\
         Penalize if delayed or no response. For each ticket, return:\n\
         - ticket_number\n\
         - ticket_score\n\
         - reason (short 2-line justification)\n\
         \n\
         Return format: JSON array like:\n\
         [\n\
         \x20 {\n\
         \x20   \"ticket_number\": \"...\",\n\
         \x20   \"ticket_score\": number,\n\
         \x20   \"reason\": \"...\"\n\
         \x20 },\n\
         \x20 ...\n\
         ]\n\
         \n\
         Tickets:\n",
    );

    for ticket in batch {
        prompt.push_str(&format!(
            "\nTicket Number: {}\nTitle: {}\nPriority: {}\nCreated: {}\nResponse: {}\nResponse Delay: {} days\n",
            ticket.number,
            ticket.title,
            ticket.priority,
            ticket.created,
            ticket.response,
            ticket.response_delay,
        ));
    }

    prompt
}

/// Score one batch of tickets.
///
/// Any failure along the way (oracle call, fence stripping, array parse,
/// element shape) degrades to a single synthetic `Batch-{n}` error record;
/// a bad batch never takes the rest of the pipeline down with it.
pub(crate) async fn score_batch(
    oracle: &dyn ScoringOracle,
    batch: &[Ticket],
    batch_index: usize,
) -> Vec<RawTicketScore> {
    let prompt = build_batch_prompt(batch);

    let raw = match oracle.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(batch_index, error = %e, "Oracle call failed for ticket batch");
            metrics::SCORE_BATCHES
                .with_label_values(&["oracle_error"])
                .inc();
            return vec![RawTicketScore::batch_failure(batch_index)];
        }
    };

    let items = match extract_array(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(batch_index, error = %e, "Unparseable oracle output for ticket batch");
            metrics::SCORE_BATCHES
                .with_label_values(&["parse_error"])
                .inc();
            return vec![RawTicketScore::batch_failure(batch_index)];
        }
    };

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<RawTicketScore>(item) {
            Ok(score) => results.push(score),
            Err(e) => {
                warn!(batch_index, error = %e, "Skipping malformed score element");
            }
        }
    }

    metrics::SCORE_BATCHES.with_label_values(&["ok"]).inc();
    results
}
