//! Query server binary
//!
//! Run with: cargo run -p askdocs --bin askdocs-server

use askdocs::{config::AppConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdocs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load("askdocs.toml")?;
    let api_key = AppConfig::api_key_from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.gemini.embed_model);
    tracing::info!("  - Generation model: {}", config.gemini.generate_model);
    tracing::info!("  - Vector index: {}", config.vector_db.persist_dir.display());
    tracing::info!("  - Top-k: {}", config.retrieval.top_k);

    let server = RagServer::new(config, api_key)?;

    println!("\nServer starting...");
    println!("  Ask page: http://{}/", server.address());
    println!("  API:      POST http://{}/api/ask", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
