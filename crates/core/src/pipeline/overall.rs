//! Second-tier scoring: one overall score per client.
//!
//! Valid tickets are compressed into one summary line each, batched, and
//! every batch is scored 0-10 by the oracle. The client's overall score is
//! the rounded mean of the per-batch scores. Batches that come back without
//! a usable JSON object score 0 instead of failing the analysis.

use tracing::warn;

use crate::metrics;
use crate::oracle::ScoringOracle;

use super::batch::partition;
use super::parse::extract_object;
use super::types::Ticket;

/// One-line digest of a ticket for the overall prompt. Content and response
/// are clipped to `summary_chars` characters, never mid-codepoint.
fn summary_line(ticket: &Ticket, summary_chars: usize) -> String {
    let clip = |text: &str| -> String { text.chars().take(summary_chars).collect() };
    format!(
        "Title: {} | Message: {} | Response: {}",
        ticket.title,
        clip(&ticket.content),
        clip(&ticket.response),
    )
}

/// Build the consistency-pinned overall prompt for one batch.
fn build_overall_prompt(client_name: &str, batch: &[Ticket], summary_chars: usize) -> String {
    let summaries: Vec<String> = batch
        .iter()
        .map(|t| summary_line(t, summary_chars))
        .collect();

    format!(
        "Analyze the following summarized support tickets. Provide an overall score (0-10) for this batch based on:\n\
         - Sentiment of client messages\n\
         - Relationship tone\n\
         - Quality of responses\n\
         \n\
         The same input must always return the same score. Do not vary your scoring unless the ticket content changes.\n\
         \n\
         Client: {}\n\
         \n\
         Tickets:\n\
         {}\n\
         \n\
         Return format as JSON:\n\
         {{ \"overall_score\": number }}\n\
         Note: The score must be an integer.",
        client_name,
        summaries.join("\n"),
    )
}

/// Score one overall batch, degrading every failure mode to 0.
async fn overall_batch_score(
    oracle: &dyn ScoringOracle,
    client_name: &str,
    batch: &[Ticket],
    summary_chars: usize,
) -> i64 {
    let prompt = build_overall_prompt(client_name, batch, summary_chars);

    let raw = match oracle.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Oracle call failed for overall batch");
            metrics::OVERALL_BATCHES
                .with_label_values(&["oracle_error"])
                .inc();
            return 0;
        }
    };

    let score = extract_object(&raw)
        .and_then(|obj| obj.get("overall_score").and_then(|v| v.as_i64()));

    match score {
        Some(score) => {
            metrics::OVERALL_BATCHES.with_label_values(&["ok"]).inc();
            score
        }
        None => {
            warn!("No integer overall_score in oracle output, scoring batch as 0");
            metrics::OVERALL_BATCHES
                .with_label_values(&["parse_error"])
                .inc();
            0
        }
    }
}

/// Compute the client's overall score: sequential per-batch calls, then the
/// mean rounded half-to-even. No valid tickets means no batches and a
/// score of 0.
pub(crate) async fn overall_score(
    oracle: &dyn ScoringOracle,
    client_name: &str,
    valid: &[Ticket],
    batch_size: usize,
    summary_chars: usize,
) -> i64 {
    let mut batch_scores = Vec::new();
    for batch in partition(valid, batch_size) {
        batch_scores.push(overall_batch_score(oracle, client_name, batch, summary_chars).await);
    }

    if batch_scores.is_empty() {
        return 0;
    }
    let sum: i64 = batch_scores.iter().sum();
    round_half_to_even(sum as f64 / batch_scores.len() as f64)
}

/// Banker's rounding: exact .5 means go to the nearest even integer.
fn round_half_to_even(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor == 0.5 {
        let below = floor as i64;
        if below % 2 == 0 {
            below
        } else {
            below + 1
        }
    } else {
        value.round() as i64
    }
}
