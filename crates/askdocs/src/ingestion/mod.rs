//! Document ingestion: loading, chunking, embedding, persistence

mod chunker;
mod loader;
mod pipeline;

pub use chunker::TextChunker;
pub use loader::DocumentLoader;
pub use pipeline::IngestPipeline;
