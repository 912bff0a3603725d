//! askdocs: retrieval-augmented Q&A over local documents
//!
//! Indexes `.txt` and `.pdf` files from a local directory into an on-disk
//! vector store, then answers questions by retrieving the most similar
//! chunks and passing them, with the question, to Gemini. Ingestion
//! (`askdocs-ingest`) and serving (`askdocs-server`) are separate
//! processes sharing only the persistence directory.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::{RagChain, EMPTY_QUESTION_REPLY};
pub use types::{Chunk, Document, ScoredChunk};
