use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supportscore_core::{
    config::OracleProvider, load_config, validate_config, HttpTicketSource, OpenAiOracle,
    ScoringOracle, ScoringPipeline, TicketSource,
};

use supportscore_server::api::create_router;
use supportscore_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(version = VERSION, "Starting supportscore");

    // Determine config path
    let config_path = std::env::var("SUPPORTSCORE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Ticket source: {}", config.source.url);
    info!("Oracle provider: {:?}", config.oracle.provider);

    // Create oracle client
    let oracle: Arc<dyn ScoringOracle> = match config.oracle.provider {
        OracleProvider::OpenAi => {
            let openai_config = config
                .oracle
                .openai
                .as_ref()
                .context("OpenAI provider selected but no openai config provided")?;
            info!(model = %openai_config.model, "Initializing OpenAI oracle");
            Arc::new(OpenAiOracle::new(openai_config))
        }
    };

    // Create ticket source
    let source: Arc<dyn TicketSource> = Arc::new(HttpTicketSource::new(config.source.clone()));

    // Create scoring pipeline
    let pipeline = Arc::new(ScoringPipeline::new(
        source,
        oracle,
        config.pipeline.clone(),
    ));

    // Create app state
    let app_state = Arc::new(AppState::new(config.clone(), pipeline));

    // Create router
    let app = create_router(app_state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
