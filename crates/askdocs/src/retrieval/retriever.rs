//! Top-k chunk retrieval for a query string

use std::sync::Arc;

use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::storage::VectorStore;
use crate::types::ScoredChunk;

/// Wraps the embedder and the vector store behind a single
/// `retrieve(query)` call with a fixed k.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<VectorStore>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever with a fixed result count
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<VectorStore>, top_k: usize) -> Self {
        Self {
            embedder,
            store,
            top_k,
        }
    }

    /// Embed the query and return the top-k most similar chunks
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.query(&query_embedding, self.top_k)?;

        tracing::debug!(
            "Retrieved {} chunks for query ({} requested)",
            results.len(),
            self.top_k
        );

        Ok(results)
    }
}
