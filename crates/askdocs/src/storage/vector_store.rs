//! Vector store backed by SQLite and the sqlite-vec extension
//!
//! Stores (vector, chunk text, metadata) triples under a persistence
//! directory shared between the ingestion run and the query process.
//! Retrieval is top-k by cosine distance; everything else (file layout,
//! durability) is left to SQLite.

use std::path::Path;
use std::sync::Once;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use sqlite_vec::sqlite3_vec_init;

use crate::error::{Error, Result};
use crate::types::{Chunk, ScoredChunk};

/// Database file name inside the persistence directory
const DB_FILE: &str = "chunks.db";

static INIT_VEC: Once = Once::new();

/// Register the sqlite-vec extension. Safe to call multiple times.
fn init_sqlite_vec() {
    INIT_VEC.call_once(|| unsafe {
        rusqlite::ffi::sqlite3_auto_extension(Some(std::mem::transmute(
            sqlite3_vec_init as *const (),
        )));
    });
}

/// Persistent store of chunk texts and their embedding vectors
#[derive(Debug)]
pub struct VectorStore {
    conn: Mutex<Connection>,
}

impl VectorStore {
    /// Open (or create) the store in the given persistence directory
    ///
    /// The embedding model name and dimension are recorded when the index
    /// is first created; opening an existing index under a different
    /// model or dimension is a configuration error, since vectors from
    /// different embedding spaces produce meaningless similarities.
    pub fn open(persist_dir: impl AsRef<Path>, model: &str, dimensions: usize) -> Result<Self> {
        let persist_dir = persist_dir.as_ref();
        std::fs::create_dir_all(persist_dir)?;

        init_sqlite_vec();

        let path = persist_dir.join(DB_FILE);
        tracing::info!("Opening vector store: {}", path.display());
        let conn = Connection::open(&path)?;

        let vec_version: String = conn.query_row("SELECT vec_version()", [], |row| row.get(0))?;
        tracing::debug!("sqlite-vec version: {}", vec_version);

        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_path TEXT NOT NULL,
                page_number INTEGER,
                char_start INTEGER NOT NULL,
                char_end INTEGER NOT NULL,
                content TEXT NOT NULL
            );

            CREATE VIRTUAL TABLE IF NOT EXISTS vec_chunks USING vec0(
                embedding FLOAT[{dimensions}]
            );

            CREATE TABLE IF NOT EXISTS index_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#
        ))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.check_embedding_space(model, dimensions)?;

        Ok(store)
    }

    /// Verify the index was built with the configured embedding model,
    /// recording it on first open.
    fn check_embedding_space(&self, model: &str, dimensions: usize) -> Result<()> {
        let conn = self.conn.lock();

        let recorded: Option<(String, String)> = conn
            .query_row(
                "SELECT
                    (SELECT value FROM index_meta WHERE key = 'embedding_model'),
                    (SELECT value FROM index_meta WHERE key = 'dimensions')",
                [],
                |row| {
                    Ok(match (row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?) {
                        (Some(m), Some(d)) => Some((m, d)),
                        _ => None,
                    })
                },
            )
            .optional()?
            .flatten();

        match recorded {
            Some((recorded_model, recorded_dims)) => {
                if recorded_model != model || recorded_dims != dimensions.to_string() {
                    return Err(Error::Config(format!(
                        "Vector index was built with embedding model '{}' ({} dims), \
                         but '{}' ({} dims) is configured",
                        recorded_model, recorded_dims, model, dimensions
                    )));
                }
            }
            None => {
                conn.execute(
                    "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('embedding_model', ?1)",
                    params![model],
                )?;
                conn.execute(
                    "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('dimensions', ?1)",
                    params![dimensions.to_string()],
                )?;
            }
        }

        Ok(())
    }

    /// Persist chunks with their embeddings
    pub fn upsert(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(Error::vector_db(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            tx.execute(
                "INSERT INTO chunks (source_path, page_number, char_start, char_end, content)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    chunk.source_path,
                    chunk.page_number,
                    chunk.char_start as i64,
                    chunk.char_end as i64,
                    chunk.text,
                ],
            )?;
            let rowid = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO vec_chunks (rowid, embedding) VALUES (?1, ?2)",
                params![rowid, serialize_vector(embedding)],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Return the k records nearest to the query vector, best first
    pub fn query(&self, query_embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT
                c.source_path,
                c.page_number,
                c.char_start,
                c.char_end,
                c.content,
                vec_distance_cosine(v.embedding, ?1) AS distance
             FROM vec_chunks v
             JOIN chunks c ON v.rowid = c.id
             ORDER BY distance ASC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(
            params![serialize_vector(query_embedding), k as i64],
            |row| {
                let distance: f64 = row.get(5)?;
                Ok(ScoredChunk {
                    chunk: Chunk {
                        source_path: row.get(0)?,
                        page_number: row.get(1)?,
                        char_start: row.get::<_, i64>(2)? as usize,
                        char_end: row.get::<_, i64>(3)? as usize,
                        text: row.get(4)?,
                    },
                    similarity: (1.0 - distance / 2.0) as f32,
                })
            },
        )?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT count(*) FROM chunks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Serialize a float32 vector into bytes for the vec0 virtual table
fn serialize_vector(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            source_path: "notes.txt".to_string(),
            page_number: None,
            char_start: 0,
            char_end: text.len(),
        }
    }

    fn unit(x: f32, y: f32, z: f32) -> Vec<f32> {
        let norm = (x * x + y * y + z * z).sqrt();
        vec![x / norm, y / norm, z / norm]
    }

    #[test]
    fn test_upsert_and_query_orders_by_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path(), "test-model", 3).unwrap();

        store
            .upsert(
                &[chunk("about cats"), chunk("about dogs"), chunk("about code")],
                &[unit(1.0, 0.0, 0.0), unit(0.0, 1.0, 0.0), unit(0.0, 0.0, 1.0)],
            )
            .unwrap();

        let results = store.query(&unit(0.9, 0.1, 0.0), 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.text, "about cats");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn test_k_caps_result_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path(), "test-model", 3).unwrap();

        store
            .upsert(
                &[chunk("a"), chunk("b"), chunk("c")],
                &[unit(1.0, 0.0, 0.0), unit(0.0, 1.0, 0.0), unit(0.0, 0.0, 1.0)],
            )
            .unwrap();

        assert_eq!(store.query(&unit(1.0, 1.0, 1.0), 2).unwrap().len(), 2);
        // Fewer records than k returns them all
        assert_eq!(store.query(&unit(1.0, 1.0, 1.0), 10).unwrap().len(), 3);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = VectorStore::open(dir.path(), "test-model", 3).unwrap();
            store
                .upsert(&[chunk("persisted")], &[unit(1.0, 0.0, 0.0)])
                .unwrap();
        }

        let reopened = VectorStore::open(dir.path(), "test-model", 3).unwrap();
        assert_eq!(reopened.len().unwrap(), 1);
        let results = reopened.query(&unit(1.0, 0.0, 0.0), 1).unwrap();
        assert_eq!(results[0].chunk.text, "persisted");
        assert!(results[0].similarity > 0.99);
    }

    #[test]
    fn test_reopen_with_different_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        {
            VectorStore::open(dir.path(), "model-a", 3).unwrap();
        }

        let err = VectorStore::open(dir.path(), "model-b", 3).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path(), "test-model", 3).unwrap();

        let err = store.upsert(&[chunk("one")], &[]).unwrap_err();
        assert!(matches!(err, Error::VectorDb(_)));
    }

    #[test]
    fn test_empty_store_query() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path(), "test-model", 3).unwrap();
        assert!(store.is_empty().unwrap());
        assert!(store.query(&unit(1.0, 0.0, 0.0), 4).unwrap().is_empty());
    }

    #[test]
    fn test_metadata_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path(), "test-model", 3).unwrap();

        let stored = Chunk {
            text: "page two text".to_string(),
            source_path: "report.pdf".to_string(),
            page_number: Some(2),
            char_start: 10,
            char_end: 23,
        };
        store
            .upsert(&[stored.clone()], &[unit(1.0, 0.0, 0.0)])
            .unwrap();

        let results = store.query(&unit(1.0, 0.0, 0.0), 1).unwrap();
        assert_eq!(results[0].chunk, stored);
    }
}
