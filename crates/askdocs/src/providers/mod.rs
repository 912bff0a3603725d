//! Provider abstractions for embeddings and answer generation
//!
//! Trait-based seams around the remote Gemini services, so the pipeline
//! can be exercised against deterministic substitutes in tests.

pub mod embedding;
pub mod gemini;
pub mod llm;

pub use embedding::EmbeddingProvider;
pub use gemini::{GeminiEmbedder, GeminiLlm};
pub use llm::LlmProvider;
