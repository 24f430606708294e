use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub oracle: OracleConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Ticket source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Ticket data endpoint (e.g. "https://example.com/get_client_data_api.php")
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u32,
}

fn default_source_timeout() -> u32 {
    30
}

/// Scoring oracle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Oracle backend type
    pub provider: OracleProvider,
    /// OpenAI-specific configuration (required when provider = "openai")
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

/// Available oracle backends
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OracleProvider {
    #[serde(rename = "openai")]
    OpenAi,
    // Future: Anthropic, Ollama
}

/// OpenAI chat-completions backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: String,
    /// Model name (default: "gpt-4o")
    #[serde(default = "default_openai_model")]
    pub model: String,
    /// API base URL (default: "https://api.openai.com")
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,
    /// Maximum tokens per completion (default: 4096)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds (default: 120)
    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u32,
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_oracle_timeout() -> u32 {
    120
}

/// Scoring pipeline tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Tickets per batch for the per-ticket scoring pass (default: 50)
    #[serde(default = "default_score_batch_size")]
    pub score_batch_size: usize,
    /// Tickets per batch for the overall-score pass (default: 100)
    #[serde(default = "default_overall_batch_size")]
    pub overall_batch_size: usize,
    /// Characters of message/response content kept in overall summaries
    /// (default: 100)
    #[serde(default = "default_summary_chars")]
    pub summary_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            score_batch_size: default_score_batch_size(),
            overall_batch_size: default_overall_batch_size(),
            summary_chars: default_summary_chars(),
        }
    }
}

fn default_score_batch_size() -> usize {
    50
}

fn default_overall_batch_size() -> usize {
    100
}

fn default_summary_chars() -> usize {
    100
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub oracle: SanitizedOracleConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOracleConfig {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<SanitizedOpenAiConfig>,
}

/// Sanitized OpenAI config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOpenAiConfig {
    pub model: String,
    pub api_base: String,
    pub api_key_configured: bool,
    pub max_tokens: u32,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            source: config.source.clone(),
            oracle: SanitizedOracleConfig {
                provider: match config.oracle.provider {
                    OracleProvider::OpenAi => "openai".to_string(),
                },
                openai: config.oracle.openai.as_ref().map(|o| SanitizedOpenAiConfig {
                    model: o.model.clone(),
                    api_base: o.api_base.clone(),
                    api_key_configured: !o.api_key.is_empty(),
                    max_tokens: o.max_tokens,
                    timeout_secs: o.timeout_secs,
                }),
            },
            pipeline: config.pipeline.clone(),
        }
    }
}
