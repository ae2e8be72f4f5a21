mod config;
mod corpus;
mod errors;
mod llm_client;
mod routes;
mod state;
mod tickets;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::loader::load_corpus;
use crate::llm_client::{GeminiProvider, InferenceProvider, OllamaProvider, ProviderRegistry};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Support API v{}", env!("CARGO_PKG_VERSION"));

    // Load the historical corpus once; read-only from here on
    let corpus = Arc::new(load_corpus(&config.data_dir));

    // Initialize inference providers
    let providers = Arc::new(build_providers(&config)?);
    info!(
        "Inference providers: {:?} (default: {})",
        providers.names(),
        providers.default_backend().provider_name()
    );
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set; Gemini tasks will report an error");
    }

    // Build app state
    let state = AppState { corpus, providers };

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

/// Builds every known provider and registers the configured default.
fn build_providers(config: &Config) -> Result<ProviderRegistry> {
    let ollama = OllamaProvider::new(
        config.ollama_url.clone(),
        config.ollama_model.clone(),
        config.llm_timeout,
    )
    .context("Failed to build Ollama HTTP client")?;

    let gemini = GeminiProvider::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.llm_timeout,
    )
    .context("Failed to build Gemini HTTP client")?;

    let providers: Vec<Arc<dyn InferenceProvider>> = vec![Arc::new(ollama), Arc::new(gemini)];

    ProviderRegistry::from_providers(&config.default_provider, providers)
        .context("No inference providers configured")
}
