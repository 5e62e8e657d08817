use ragdoll_core::error::AppError;
use serde::{Deserialize, Serialize};

/// One stored embedding: chunk text, its vector, and a batch-local id
/// (monotonic from 0 per ingestion run).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    pub id: u64,
    pub vector: Vec<f32>,
    pub text: String,
}

/// One retrieval result: the stored payload text and its similarity score,
/// higher is closer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub text: String,
    pub score: f32,
}

/// Vector search capability. Collections use the cosine metric; dimension is
/// fixed at creation. `search` on an absent or empty collection returns an
/// empty list, not an error.
pub trait VectorStore {
    fn create_collection(&self, name: &str, dims: usize) -> Result<(), AppError>;
    fn delete_collection(&self, name: &str) -> Result<(), AppError>;
    fn list_collections(&self) -> Result<Vec<String>, AppError>;
    fn upsert(&self, name: &str, records: &[VectorRecord]) -> Result<(), AppError>;
    fn search(&self, name: &str, vector: &[f32], limit: usize)
        -> Result<Vec<SearchHit>, AppError>;
}

pub mod memory;
pub mod qdrant;
mod similarity;

pub use memory::MemoryStore;
pub use qdrant::QdrantStore;
