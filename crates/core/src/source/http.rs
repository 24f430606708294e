//! HTTP ticket source backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::SourceConfig;
use crate::metrics;

use super::{parse_payload, ClientRecords, SourceError, TicketSource};

/// Ticket source backed by the upstream client-data HTTP endpoint.
pub struct HttpTicketSource {
    client: Client,
    config: SourceConfig,
}

impl HttpTicketSource {
    /// Create a new source with the given configuration.
    pub fn new(config: SourceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl TicketSource for HttpTicketSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, client_id: &str) -> Result<ClientRecords, SourceError> {
        let started = Instant::now();
        let result = self.fetch_inner(client_id).await;
        metrics::EXTERNAL_SERVICE_DURATION.observe(started.elapsed().as_secs_f64());
        metrics::EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&["source", if result.is_ok() { "ok" } else { "error" }])
            .inc();
        result
    }
}

impl HttpTicketSource {
    async fn fetch_inner(&self, client_id: &str) -> Result<ClientRecords, SourceError> {
        debug!(client_id, url = %self.config.url, "Fetching client tickets");

        let response = self
            .client
            .post(&self.config.url)
            .form(&[("cnb_id", client_id)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout
                } else {
                    SourceError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status,
                message: body.chars().take(200).collect::<String>(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let records = parse_payload(&body)?;
        debug!(
            client_id,
            client_name = %records.client_name,
            tickets = records.tickets.len(),
            "Client tickets fetched"
        );

        Ok(records)
    }
}
