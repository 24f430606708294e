use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Source URL is not empty
/// - The selected oracle provider has its backend section
/// - Pipeline batch sizes are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Source validation
    if config.source.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.url cannot be empty".to_string(),
        ));
    }

    // Oracle validation
    match config.oracle.provider {
        super::OracleProvider::OpenAi => {
            let openai = config.oracle.openai.as_ref().ok_or_else(|| {
                ConfigError::ValidationError(
                    "oracle.provider is \"openai\" but [oracle.openai] is missing".to_string(),
                )
            })?;
            if openai.api_key.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "oracle.openai.api_key cannot be empty".to_string(),
                ));
            }
        }
    }

    // Pipeline validation
    if config.pipeline.score_batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.score_batch_size must be at least 1".to_string(),
        ));
    }
    if config.pipeline.overall_batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.overall_batch_size must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        OpenAiConfig, OracleConfig, OracleProvider, PipelineConfig, ServerConfig, SourceConfig,
    };
    use std::net::IpAddr;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig::default(),
            source: SourceConfig {
                url: "http://localhost:9000/tickets".to_string(),
                timeout_secs: 30,
            },
            oracle: OracleConfig {
                provider: OracleProvider::OpenAi,
                openai: Some(OpenAiConfig {
                    api_key: "k".to_string(),
                    model: "gpt-4o".to_string(),
                    api_base: "https://api.openai.com".to_string(),
                    max_tokens: 4096,
                    timeout_secs: 120,
                }),
            },
            pipeline: PipelineConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server = ServerConfig {
            host: "0.0.0.0".parse::<IpAddr>().unwrap(),
            port: 0,
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_validate_missing_openai_section_fails() {
        let mut config = valid_config();
        config.oracle.openai = None;
        let result = validate_config(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_blank_api_key_fails() {
        let mut config = valid_config();
        config.oracle.openai.as_mut().unwrap().api_key = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_batch_size_fails() {
        let mut config = valid_config();
        config.pipeline.score_batch_size = 0;
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.pipeline.overall_batch_size = 0;
        assert!(validate_config(&config).is_err());
    }
}
