mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::generation::fit_scoring::KeywordFitScorer;
use crate::generation::generator::GenerationSettings;
use crate::llm_client::{GenerationClient, GenerationParams, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumegen API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generation client (absent key → generate requests fail fast)
    let generation: Option<Arc<dyn GenerationClient>> = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.gemini_model.clone())?;
            info!("Generation client initialized (model: {})", config.gemini_model);
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY is not set; resume generation requests will be rejected");
            None
        }
    };

    let settings = GenerationSettings {
        timeout: config.generation_timeout,
        params: GenerationParams::default(),
    };
    info!("Generation timeout: {}s", settings.timeout.as_secs());

    // Build app state
    let state = AppState {
        generation,
        fit_scorer: Arc::new(KeywordFitScorer),
        settings,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
