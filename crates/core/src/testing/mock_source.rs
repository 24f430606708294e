//! Mock ticket source for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::source::{ClientRecords, RawTicketRecord, SourceError, TicketSource};

/// Mock implementation of the TicketSource trait.
///
/// Record sets are scripted per call with [`push_records`](Self::push_records)
/// and failures with [`fail_next`](Self::fail_next); requested client ids are
/// recorded for assertions.
pub struct MockTicketSource {
    queue: Arc<RwLock<VecDeque<Result<ClientRecords, SourceError>>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl Default for MockTicketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketSource {
    /// Create a new mock source with nothing scripted.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(RwLock::new(VecDeque::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a record set for the next fetch.
    pub async fn push_records(&self, client_name: &str, tickets: Vec<RawTicketRecord>) {
        self.queue.write().await.push_back(Ok(ClientRecords {
            client_name: client_name.to_string(),
            tickets,
        }));
    }

    /// Queue a generic HTTP failure for the next fetch.
    pub async fn fail_next(&self, message: &str) {
        self.fail_next_with(SourceError::Http(message.to_string()))
            .await;
    }

    /// Queue a specific error for the next fetch.
    pub async fn fail_next_with(&self, error: SourceError) {
        self.queue.write().await.push_back(Err(error));
    }

    /// All client ids fetched so far, in call order.
    pub async fn recorded_requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, client_id: &str) -> Result<ClientRecords, SourceError> {
        self.requests.write().await.push(client_id.to_string());

        match self.queue.write().await.pop_front() {
            Some(outcome) => outcome,
            None => Err(SourceError::Http("no scripted records".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_records_pop_in_order() {
        let source = MockTicketSource::new();
        source.push_records("Acme Corp", Vec::new()).await;
        source.fail_next("down").await;

        let records = source.fetch("client-1").await.unwrap();
        assert_eq!(records.client_name, "Acme Corp");

        let err = source.fetch("client-2").await.unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));

        assert_eq!(
            source.recorded_requests().await,
            vec!["client-1".to_string(), "client-2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unscripted_fetch_fails() {
        let source = MockTicketSource::new();
        assert!(source.fetch("client-1").await.is_err());
    }

    #[tokio::test]
    async fn test_typed_error_passes_through() {
        let source = MockTicketSource::new();
        source
            .fail_next_with(SourceError::MalformedPayload("not json".to_string()))
            .await;

        let err = source.fetch("client-1").await.unwrap_err();
        assert!(matches!(err, SourceError::MalformedPayload(_)));
    }
}
