//! Scoring oracle abstraction and implementations.
//!
//! The oracle is an external text-in/text-out service (an LLM) that grades
//! support quality. It is treated as unreliable: every call site must cope
//! with errors, empty output, and malformed text.

mod openai;

pub use openai::OpenAiOracle;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Fixed system role sent with every scoring prompt.
pub const SYSTEM_ROLE: &str = "You are a customer experience analyst.";

/// Errors that can occur when calling the oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Empty completion")]
    EmptyCompletion,
}

/// Trait for scoring oracle clients.
///
/// One method: text prompt in, free text out. Determinism is requested
/// (zero temperature), never guaranteed.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    /// Provider name (e.g. "openai") for logging.
    fn name(&self) -> &str;

    /// Send a prompt and return the oracle's raw text response.
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}
