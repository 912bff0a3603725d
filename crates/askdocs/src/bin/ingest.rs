//! Ingestion binary: build the vector index from local documents
//!
//! Run with: cargo run -p askdocs --bin askdocs-ingest

use std::sync::Arc;

use askdocs::config::AppConfig;
use askdocs::ingestion::{DocumentLoader, IngestPipeline, TextChunker};
use askdocs::providers::GeminiEmbedder;
use askdocs::storage::VectorStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdocs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load("askdocs.toml")?;
    let api_key = AppConfig::api_key_from_env()?;

    tracing::info!("Loading documents from {}...", config.ingestion.data_dir.display());

    let pipeline = IngestPipeline::new(
        DocumentLoader::new(config.ingestion.data_dir.clone()),
        TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap),
        Arc::new(GeminiEmbedder::new(&config.gemini, api_key)),
        Arc::new(VectorStore::open(
            &config.vector_db.persist_dir,
            &config.gemini.embed_model,
            config.gemini.dimensions,
        )?),
    );

    let chunk_count = pipeline.run().await?;

    tracing::info!(
        "Vector index persisted to {} ({} chunks)",
        config.vector_db.persist_dir.display(),
        chunk_count
    );

    Ok(())
}
