//! Mock scoring oracle for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::oracle::{OracleError, ScoringOracle};

/// Mock implementation of the ScoringOracle trait.
///
/// Provides controllable behavior for testing:
/// - Queue completions in call order with [`push_response`](Self::push_response)
/// - Queue failures with [`fail_next`](Self::fail_next)
/// - Key completions to prompt content with
///   [`respond_when`](Self::respond_when) when call order is not fixed,
///   as with concurrently dispatched batches
/// - Inspect every prompt received via
///   [`recorded_prompts`](Self::recorded_prompts)
pub struct MockOracle {
    /// Scripted outcomes consumed in call order.
    queue: Arc<RwLock<VecDeque<Result<String, String>>>>,
    /// Prompt-substring-keyed outcomes, checked before the queue. Not
    /// consumed, so a keyed entry can serve repeated calls.
    keyed: Arc<RwLock<Vec<(String, Result<String, String>)>>>,
    /// Every prompt this oracle has been asked to complete.
    prompts: Arc<RwLock<Vec<String>>>,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOracle {
    /// Create a new mock oracle with nothing scripted.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(RwLock::new(VecDeque::new())),
            keyed: Arc::new(RwLock::new(Vec::new())),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a completion for the next unkeyed call.
    pub async fn push_response(&self, response: &str) {
        self.queue.write().await.push_back(Ok(response.to_string()));
    }

    /// Queue a failure for the next unkeyed call.
    pub async fn fail_next(&self, message: &str) {
        self.queue.write().await.push_back(Err(message.to_string()));
    }

    /// Serve `response` for any prompt containing `substring`.
    pub async fn respond_when(&self, substring: &str, response: &str) {
        self.keyed
            .write()
            .await
            .push((substring.to_string(), Ok(response.to_string())));
    }

    /// Fail any prompt containing `substring`.
    pub async fn fail_when(&self, substring: &str, message: &str) {
        self.keyed
            .write()
            .await
            .push((substring.to_string(), Err(message.to_string())));
    }

    /// All prompts received so far, in call order.
    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.read().await.clone()
    }
}

#[async_trait]
impl ScoringOracle for MockOracle {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        self.prompts.write().await.push(prompt.to_string());

        for (substring, outcome) in self.keyed.read().await.iter() {
            if prompt.contains(substring.as_str()) {
                return outcome
                    .clone()
                    .map_err(OracleError::Http);
            }
        }

        match self.queue.write().await.pop_front() {
            Some(outcome) => outcome.map_err(OracleError::Http),
            None => Err(OracleError::Http("no scripted response".to_string())),
        }
    }
}
