//! Ticket triage: split a client's raw records into ignored, unresponded
//! and scoreable tickets.

use crate::source::RawTicketRecord;

use super::delay::response_delay;
use super::types::{Ticket, Triage};

/// Title fragments that mark administrative booking tickets to be skipped.
const BOOK_TRAINING_MARKERS: [&str; 2] = ["book a training", "book training"];

/// Classify raw records into triage buckets.
///
/// Records arrive in ascending numeric key order (guaranteed by the
/// source parser), so the valid-ticket sequence and every batch derived
/// from it are reproducible across runs. For each record: "book training"
/// titles are ignored, blank responses count as unresponded, and the rest
/// get a computed response delay and become scoreable.
///
/// Invariant: `total == book_training + no_response + valid.len()`.
pub fn classify_tickets(records: &[RawTicketRecord]) -> Triage {
    let mut triage = Triage::default();

    for record in records {
        triage.total += 1;

        let title = record.title.trim().to_lowercase();
        if BOOK_TRAINING_MARKERS
            .iter()
            .any(|marker| title.contains(marker))
        {
            triage.book_training += 1;
            continue;
        }

        if record.response.trim().is_empty() {
            triage.no_response += 1;
            continue;
        }

        triage.valid.push(Ticket {
            number: record.number.clone(),
            title: record.title.clone(),
            priority: record
                .priority
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "Normal".to_string()),
            created: record.created.clone(),
            content: record.content.clone(),
            response: record.response.clone(),
            response_delay: response_delay(&record.created, &record.response),
        });
    }

    triage
}
