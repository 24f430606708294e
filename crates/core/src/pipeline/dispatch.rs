//! Concurrent fan-out of per-ticket scoring batches.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::debug;

use crate::oracle::ScoringOracle;

use super::batch::partition;
use super::scorer::score_batch;
use super::types::{ScoredTicket, Ticket};

/// Score every valid ticket, one oracle call per batch, all batches in
/// flight at once.
///
/// Results are collected in completion order, so callers must not assume
/// batch-index ordering across the output; within a batch the oracle's own
/// list order is preserved. Each returned record is reconciled against its
/// originating batch by ticket number: a match yields an enriched record
/// carrying the stored title and priority, anything else (including the
/// synthetic batch-failure record) passes through verbatim.
pub(crate) async fn dispatch_batches(
    oracle: Arc<dyn ScoringOracle>,
    valid: &[Ticket],
    batch_size: usize,
) -> Vec<ScoredTicket> {
    let batches = partition(valid, batch_size);
    debug!(
        tickets = valid.len(),
        batches = batches.len(),
        batch_size,
        "Dispatching ticket score batches"
    );

    let mut in_flight: FuturesUnordered<_> = batches
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let oracle = Arc::clone(&oracle);
            let batch: Vec<Ticket> = chunk.to_vec();
            async move {
                let results = score_batch(oracle.as_ref(), &batch, index).await;
                (batch, results)
            }
        })
        .collect();

    let mut scored = Vec::with_capacity(valid.len());
    while let Some((batch, results)) = in_flight.next().await {
        for raw in results {
            match batch.iter().find(|t| t.number == raw.ticket_number) {
                Some(ticket) => scored.push(ScoredTicket::reconciled(raw, ticket)),
                None => scored.push(ScoredTicket::unmatched(raw)),
            }
        }
    }

    scored
}
