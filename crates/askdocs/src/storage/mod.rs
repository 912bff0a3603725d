//! On-disk persistence for chunk vectors

mod vector_store;

pub use vector_store::VectorStore;
