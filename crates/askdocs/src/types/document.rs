//! Document and chunk types with source tracking

use serde::{Deserialize, Serialize};

/// A raw document produced by the loader
///
/// Text files yield one `Document` per file; PDFs yield one per page.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Extracted text content
    pub text: String,
    /// Path of the source file
    pub source_path: String,
    /// Page number (1-indexed, PDFs only)
    pub page_number: Option<u32>,
}

impl Document {
    /// Create a document from a text file
    pub fn text(text: String, source_path: impl Into<String>) -> Self {
        Self {
            text,
            source_path: source_path.into(),
            page_number: None,
        }
    }

    /// Create a document from one PDF page
    pub fn pdf_page(text: String, source_path: impl Into<String>, page_number: u32) -> Self {
        Self {
            text,
            source_path: source_path.into(),
            page_number: Some(page_number),
        }
    }
}

/// A bounded slice of a document, the unit of embedding and retrieval
///
/// Chunks are exact substrings of the document text; `char_start` and
/// `char_end` are byte offsets into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub text: String,
    /// Path of the source file
    pub source_path: String,
    /// Page number (1-indexed, PDFs only)
    pub page_number: Option<u32>,
    /// Byte offset of the chunk start within the document text
    pub char_start: usize,
    /// Byte offset one past the chunk end
    pub char_end: usize,
}

/// A chunk returned from retrieval together with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Similarity score (0.0 to 1.0, higher is more similar)
    pub similarity: f32,
}
