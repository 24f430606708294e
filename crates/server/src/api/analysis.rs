//! Analysis API handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use supportscore_core::{AnalysisReport, PipelineError};
use tracing::{error, info};

use crate::state::AppState;

/// Request body for running an analysis
#[derive(Debug, Deserialize)]
pub struct AnalysisBody {
    /// Client identifier forwarded to the ticket source
    #[serde(default)]
    pub cnb_id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct AnalysisErrorResponse {
    pub error: String,
}

/// Run the full scoring analysis for one client
pub async fn run_analysis(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalysisBody>,
) -> Result<Json<AnalysisReport>, impl IntoResponse> {
    info!(cnb_id = %body.cnb_id, "Analysis requested");

    match state.pipeline().analyze(&body.cnb_id).await {
        Ok(report) => Ok(Json(report)),
        Err(PipelineError::MissingClientId) => Err((
            StatusCode::BAD_REQUEST,
            Json(AnalysisErrorResponse {
                error: "Missing cnb_id".to_string(),
            }),
        )),
        // Every source failure is a collaborator error, malformed
        // payloads included.
        Err(PipelineError::Source(e)) => {
            error!(cnb_id = %body.cnb_id, error = %e, "Analysis failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(AnalysisErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
