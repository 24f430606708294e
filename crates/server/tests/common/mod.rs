//! Common test utilities for E2E testing with mocks.
//!
//! Provides a test fixture that builds the full router in process with mock
//! collaborators injected, so endpoint tests run without external
//! infrastructure.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use supportscore_core::config::{
    Config, OpenAiConfig, OracleConfig, OracleProvider, PipelineConfig, ServerConfig, SourceConfig,
};
use supportscore_core::testing::{MockOracle, MockTicketSource};
use supportscore_core::ScoringPipeline;

use supportscore_server::api::create_router;
use supportscore_server::state::AppState;

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test fixture for E2E testing with mock dependencies.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock ticket source - script record sets and failures
    pub source: Arc<MockTicketSource>,
    /// Mock oracle - script completions
    pub oracle: Arc<MockOracle>,
}

impl TestFixture {
    /// Create a new test fixture with nothing scripted.
    pub fn new() -> Self {
        let source = Arc::new(MockTicketSource::new());
        let oracle = Arc::new(MockOracle::new());

        let config = Config {
            server: ServerConfig {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            source: SourceConfig {
                url: "http://127.0.0.1:1/tickets".to_string(),
                timeout_secs: 5,
            },
            oracle: OracleConfig {
                provider: OracleProvider::OpenAi,
                openai: Some(OpenAiConfig {
                    api_key: "test-key".to_string(),
                    model: "gpt-4o".to_string(),
                    api_base: "https://api.openai.com".to_string(),
                    max_tokens: 4096,
                    timeout_secs: 5,
                }),
            },
            pipeline: PipelineConfig::default(),
        };

        let pipeline = Arc::new(ScoringPipeline::new(
            Arc::clone(&source) as _,
            Arc::clone(&oracle) as _,
            config.pipeline.clone(),
        ));

        let state = Arc::new(AppState::new(config, pipeline));
        let router = create_router(state);

        Self {
            router,
            source,
            oracle,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a GET request and return the raw body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
