//! Application state for the query server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::pipeline::RagChain;
use crate::providers::{EmbeddingProvider, GeminiEmbedder, GeminiLlm, LlmProvider};
use crate::retrieval::Retriever;
use crate::storage::VectorStore;

/// Shared application state
///
/// Owns the question-answering chain, built once at startup and reused for
/// every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    chain: RagChain,
}

impl AppState {
    /// Create the application state, opening the persisted vector index
    /// and wiring up the Gemini clients.
    pub fn new(config: AppConfig, api_key: String) -> Result<Self> {
        let store = Arc::new(VectorStore::open(
            &config.vector_db.persist_dir,
            &config.gemini.embed_model,
            config.gemini.dimensions,
        )?);

        if store.is_empty()? {
            tracing::warn!(
                "Vector index at {} is empty; run askdocs-ingest first",
                config.vector_db.persist_dir.display()
            );
        }

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(GeminiEmbedder::new(&config.gemini, api_key.clone()));
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiLlm::new(&config.gemini, api_key));

        let retriever = Retriever::new(embedder, store, config.retrieval.top_k);
        let chain = RagChain::new(retriever, llm);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, chain }),
        })
    }

    /// Get the question-answering chain
    pub fn chain(&self) -> &RagChain {
        &self.inner.chain
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }
}
