//! One-shot ingestion run: load → chunk → embed → persist

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ingestion::{DocumentLoader, TextChunker};
use crate::providers::EmbeddingProvider;
use crate::storage::VectorStore;

/// Builds the vector index from the documents on disk
///
/// Runs to completion before the query process starts; the two share
/// nothing but the persistence directory.
pub struct IngestPipeline {
    loader: DocumentLoader,
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<VectorStore>,
}

impl IngestPipeline {
    /// Assemble the pipeline
    pub fn new(
        loader: DocumentLoader,
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<VectorStore>,
    ) -> Self {
        Self {
            loader,
            chunker,
            embedder,
            store,
        }
    }

    /// Run the full ingestion, returning the number of chunks persisted
    ///
    /// A scan that yields zero documents is a hard stop.
    pub async fn run(&self) -> Result<usize> {
        let documents = self.loader.load()?;
        if documents.is_empty() {
            return Err(Error::Ingestion(
                "No documents found in the data directory. Add .txt or .pdf files first."
                    .to_string(),
            ));
        }
        tracing::info!("Loaded {} documents, splitting...", documents.len());

        let chunks: Vec<_> = documents
            .iter()
            .flat_map(|doc| self.chunker.chunk_document(doc))
            .collect();
        tracing::info!("Created {} chunks, embedding...", chunks.len());

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.store.upsert(&chunks, &embeddings)?;

        Ok(chunks.len())
    }
}
