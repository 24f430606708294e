use std::sync::Arc;
use supportscore_core::{Config, SanitizedConfig, ScoringPipeline};

/// Shared application state
pub struct AppState {
    config: Config,
    pipeline: Arc<ScoringPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: Arc<ScoringPipeline>) -> Self {
        Self { config, pipeline }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn pipeline(&self) -> &ScoringPipeline {
        self.pipeline.as_ref()
    }
}
