//! OpenAI chat-completions oracle client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::metrics;

use super::{OracleError, ScoringOracle, SYSTEM_ROLE};

/// OpenAI API client.
///
/// Requests are pinned to temperature 0 so identical prompts lean towards
/// identical output, which the aggregation pass depends on.
pub struct OpenAiOracle {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiOracle {
    /// Create a new client from configuration.
    pub fn new(config: &OpenAiConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs as u64);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            timeout,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl ScoringOracle for OpenAiOracle {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let started = Instant::now();
        let result = self.request(prompt).await;
        metrics::EXTERNAL_SERVICE_DURATION.observe(started.elapsed().as_secs_f64());
        metrics::EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&["oracle", if result.is_ok() { "ok" } else { "error" }])
            .inc();
        result
    }
}

impl OpenAiOracle {
    async fn request(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: 0.0,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_ROLE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling scoring oracle");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(self.timeout)
                } else {
                    OracleError::Http(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(OracleError::Api { status, message });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Json(e.to_string()))?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OracleError::EmptyCompletion)?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: "test-key".to_string(),
            model: "gpt-4o".to_string(),
            api_base: "https://api.openai.com/".to_string(),
            max_tokens: 4096,
            timeout_secs: 120,
        }
    }

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let oracle = OpenAiOracle::new(&test_config());
        assert_eq!(oracle.name(), "openai");
        assert_eq!(oracle.api_base, "https://api.openai.com");
    }

    #[test]
    fn test_client_custom_base() {
        let oracle = OpenAiOracle::new(&test_config()).with_api_base("http://localhost:8089");
        assert_eq!(oracle.api_base, "http://localhost:8089");
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            temperature: 0.0,
            max_tokens: 4096,
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_ROLE.to_string(),
            }],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o\""));
        assert!(json.contains("\"temperature\":0"));
        assert!(json.contains("customer experience analyst"));
    }

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }
}
