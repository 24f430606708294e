pub mod config;
pub mod metrics;
pub mod oracle;
pub mod pipeline;
pub mod source;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, OracleProvider,
    PipelineConfig, SanitizedConfig,
};
pub use oracle::{OpenAiOracle, OracleError, ScoringOracle};
pub use pipeline::{AnalysisReport, PipelineError, ScoredTicket, ScoringPipeline};
pub use source::{HttpTicketSource, SourceError, TicketSource};
