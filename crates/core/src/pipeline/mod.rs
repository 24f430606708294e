//! Ticket scoring pipeline: fetch, triage, score, aggregate.

mod batch;
mod classify;
mod delay;
mod dispatch;
mod overall;
mod parse;
mod scorer;
mod types;

pub use classify::classify_tickets;
pub use parse::{extract_array, extract_object, ParseError};
pub use types::{AnalysisReport, RawTicketScore, ScoreValue, ScoredTicket, Ticket, Triage};

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::config::PipelineConfig;
use crate::metrics;
use crate::oracle::ScoringOracle;
use crate::source::{SourceError, TicketSource};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing client id")]
    MissingClientId,

    #[error("Ticket source error: {0}")]
    Source(#[from] SourceError),
}

/// The full analysis pipeline for one client's support tickets.
///
/// Collaborators are trait objects so tests can swap in scripted stands-in
/// for the upstream ticket service and the oracle.
pub struct ScoringPipeline {
    source: Arc<dyn TicketSource>,
    oracle: Arc<dyn ScoringOracle>,
    config: PipelineConfig,
}

impl ScoringPipeline {
    pub fn new(
        source: Arc<dyn TicketSource>,
        oracle: Arc<dyn ScoringOracle>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            oracle,
            config,
        }
    }

    /// Run the full analysis for one client.
    ///
    /// Fetches the client's records, triages them, then runs the per-ticket
    /// and overall scoring passes concurrently. Oracle trouble never fails
    /// the analysis; only a blank client id or a source failure does.
    pub async fn analyze(&self, client_id: &str) -> Result<AnalysisReport, PipelineError> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(PipelineError::MissingClientId);
        }

        let started = Instant::now();
        let records = self.source.fetch(client_id).await?;
        let triage = classify_tickets(&records.tickets);
        info!(
            client_id,
            client_name = %records.client_name,
            total = triage.total,
            book_training = triage.book_training,
            no_response = triage.no_response,
            valid = triage.valid.len(),
            "Triaged client tickets"
        );

        let (ticket_details, overall_score) = tokio::join!(
            dispatch::dispatch_batches(
                Arc::clone(&self.oracle),
                &triage.valid,
                self.config.score_batch_size,
            ),
            overall::overall_score(
                self.oracle.as_ref(),
                &records.client_name,
                &triage.valid,
                self.config.overall_batch_size,
                self.config.summary_chars,
            ),
        );

        let elapsed = started.elapsed();
        metrics::ANALYSIS_DURATION.observe(elapsed.as_secs_f64());
        info!(
            client_id,
            overall_score,
            scored = ticket_details.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            cnb_id: client_id.to_string(),
            client_name: records.client_name,
            total_tickets: triage.total,
            book_training_tickets: triage.book_training,
            tickets_without_response: triage.no_response,
            overall_score,
            ticket_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawTicketRecord;
    use crate::testing::{MockOracle, MockTicketSource};

    fn record(number: &str, title: &str, response: &str) -> RawTicketRecord {
        RawTicketRecord {
            number: number.to_string(),
            title: title.to_string(),
            priority: None,
            created: "01.03.24 09:30".to_string(),
            content: "Something is broken".to_string(),
            response: response.to_string(),
        }
    }

    fn pipeline(source: MockTicketSource, oracle: MockOracle) -> ScoringPipeline {
        ScoringPipeline::new(
            Arc::new(source),
            Arc::new(oracle),
            PipelineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_client_id() {
        let p = pipeline(MockTicketSource::new(), MockOracle::new());
        let err = p.analyze("   ").await.unwrap_err();
        assert!(matches!(err, PipelineError::MissingClientId));
    }

    #[tokio::test]
    async fn test_analyze_propagates_source_failure() {
        let source = MockTicketSource::new();
        source.fail_next("upstream down").await;
        let p = pipeline(source, MockOracle::new());

        let err = p.analyze("client-7").await.unwrap_err();
        assert!(matches!(err, PipelineError::Source(_)));
    }

    #[tokio::test]
    async fn test_analyze_full_run() {
        let source = MockTicketSource::new();
        source
            .push_records(
                "Acme Corp",
                vec![
                    record("T-1", "Book a training", "02.03.24 booked"),
                    record("T-2", "Printer offline", ""),
                    record("T-3", "Cannot log in", "02.03.24 reset your password"),
                ],
            )
            .await;

        let oracle = MockOracle::new();
        // The two passes run concurrently, so responses are keyed to
        // prompt content rather than call order.
        oracle
            .respond_when(
                "Ticket Number:",
                r#"[{"ticket_number": "T-3", "ticket_score": 8, "reason": "Quick reset."}]"#,
            )
            .await;
        oracle
            .respond_when("overall score", r#"{"overall_score": 8}"#)
            .await;

        let p = pipeline(source, oracle);
        let report = p.analyze("client-7").await.unwrap();

        assert_eq!(report.cnb_id, "client-7");
        assert_eq!(report.client_name, "Acme Corp");
        assert_eq!(report.total_tickets, 3);
        assert_eq!(report.book_training_tickets, 1);
        assert_eq!(report.tickets_without_response, 1);
        assert_eq!(report.overall_score, 8);
        assert_eq!(report.ticket_details.len(), 1);
        assert_eq!(report.ticket_details[0].ticket_number, "T-3");
        assert_eq!(
            report.ticket_details[0].ticket_title.as_deref(),
            Some("Cannot log in")
        );
    }

    #[tokio::test]
    async fn test_analyze_no_valid_tickets_scores_zero() {
        let source = MockTicketSource::new();
        source
            .push_records("Acme Corp", vec![record("T-1", "Printer offline", "")])
            .await;

        let oracle = MockOracle::new();
        let p = pipeline(source, oracle);
        let report = p.analyze("client-7").await.unwrap();

        assert_eq!(report.overall_score, 0);
        assert!(report.ticket_details.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_trims_client_id() {
        let source = MockTicketSource::new();
        source.push_records("Acme Corp", Vec::new()).await;

        let p = pipeline(source, MockOracle::new());
        let report = p.analyze("  client-7  ").await.unwrap();
        assert_eq!(report.cnb_id, "client-7");
    }
}
