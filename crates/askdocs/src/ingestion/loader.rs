//! Document loading from a local directory tree

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::Document;

/// Recursive loader for `.txt` and `.pdf` files
///
/// Text files become one document each; PDFs become one document per page.
/// Files with any other extension are skipped. A file that fails to decode
/// or parse aborts the whole load.
pub struct DocumentLoader {
    data_dir: PathBuf,
}

impl DocumentLoader {
    /// Create a loader rooted at the given directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Scan the directory tree and load every supported file
    ///
    /// The walk is sorted by file name so repeated ingestion runs visit
    /// files in the same order.
    pub fn load(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.data_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            match extension_of(path).as_deref() {
                Some("txt") => documents.push(self.load_text(path)?),
                Some("pdf") => documents.extend(self.load_pdf(path)?),
                _ => {
                    tracing::debug!("Skipping unsupported file: {}", path.display());
                }
            }
        }

        tracing::info!(
            "Loaded {} documents from {}",
            documents.len(),
            self.data_dir.display()
        );

        Ok(documents)
    }

    /// Load a UTF-8 text file as a single document
    fn load_text(&self, path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::document_load(path.display().to_string(), e.to_string()))?;

        Ok(Document::text(text, path.display().to_string()))
    }

    /// Load a PDF as one document per page
    fn load_pdf(&self, path: &Path) -> Result<Vec<Document>> {
        let pdf = lopdf::Document::load(path)
            .map_err(|e| Error::document_load(path.display().to_string(), e.to_string()))?;

        let mut documents = Vec::new();
        for page_number in pdf.get_pages().keys() {
            let text = pdf
                .extract_text(&[*page_number])
                .map_err(|e| Error::document_load(path.display().to_string(), e.to_string()))?;
            documents.push(Document::pdf_page(
                text,
                path.display().to_string(),
                *page_number,
            ));
        }

        Ok(documents)
    }
}

/// Lowercased extension of a path, if any
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
