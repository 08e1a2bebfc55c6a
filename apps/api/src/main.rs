mod assessment;
mod chat;
mod config;
mod errors;
mod llm_client;
mod marketplace;
mod models;
mod normalizer;
mod rag;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::embeddings::GeminiEmbedder;
use crate::llm_client::LlmClient;
use crate::rag::Corpora;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WorkHive API v{}", env!("CARGO_PKG_VERSION"));

    // Build every corpus index before serving; a missing file is fatal
    let embedder = Arc::new(GeminiEmbedder::new(
        config.google_api_key.clone(),
        config.embedding_model.clone(),
    )?);
    let corpora = Corpora::build(&config.data_dir, embedder)
        .await
        .with_context(|| format!("Failed to build corpora from {}", config.data_dir.display()))?;
    info!("Corpora ready (embedding model: {})", config.embedding_model);

    // Initialize LLM client
    let llm = LlmClient::new(config.google_api_key.clone(), config.chat_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        llm: Arc::new(llm),
        corpora,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
