use std::collections::BTreeMap;
use std::sync::Mutex;

use ragdoll_core::error::AppError;

use super::similarity;
use super::{SearchHit, VectorRecord, VectorStore};

#[derive(Debug)]
struct Collection {
    dims: usize,
    records: Vec<VectorRecord>,
}

/// In-process vector store with cosine ranking. Used by tests and by local
/// runs that do not want a Qdrant instance; behavior mirrors the external
/// store contract, including empty results for absent collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Collection>>, AppError> {
        self.collections
            .lock()
            .map_err(|_| AppError::new("VECTOR_STORE_FAILED", "Memory store lock poisoned"))
    }
}

impl VectorStore for MemoryStore {
    fn create_collection(&self, name: &str, dims: usize) -> Result<(), AppError> {
        if dims == 0 {
            return Err(AppError::new(
                "VECTOR_STORE_FAILED",
                "Collection dimension must be positive",
            ));
        }
        let mut collections = self.lock()?;
        if collections.contains_key(name) {
            return Err(
                AppError::new("VECTOR_STORE_FAILED", "Collection already exists")
                    .with_details(format!("name={name}")),
            );
        }
        collections.insert(
            name.to_string(),
            Collection {
                dims,
                records: Vec::new(),
            },
        );
        Ok(())
    }

    fn delete_collection(&self, name: &str) -> Result<(), AppError> {
        // Deleting an absent collection is a no-op, matching the backend.
        self.lock()?.remove(name);
        Ok(())
    }

    fn list_collections(&self) -> Result<Vec<String>, AppError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn upsert(&self, name: &str, records: &[VectorRecord]) -> Result<(), AppError> {
        let mut collections = self.lock()?;
        let collection = collections.get_mut(name).ok_or_else(|| {
            AppError::new("VECTOR_STORE_FAILED", "Collection does not exist")
                .with_details(format!("name={name}"))
        })?;
        for record in records {
            if record.vector.len() != collection.dims {
                return Err(AppError::new(
                    "VECTOR_STORE_DIM_MISMATCH",
                    "Record dimension disagrees with the collection",
                )
                .with_details(format!(
                    "id={}; expected={}; got={}",
                    record.id,
                    collection.dims,
                    record.vector.len()
                )));
            }
            match collection.records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => collection.records.push(record.clone()),
            }
        }
        Ok(())
    }

    fn search(
        &self,
        name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, AppError> {
        let collections = self.lock()?;
        let collection = match collections.get(name) {
            Some(collection) => collection,
            None => return Ok(Vec::new()),
        };
        let q_norm = similarity::l2_norm(vector);
        if q_norm == 0.0 {
            return Ok(Vec::new());
        }
        let mut scored: Vec<(u64, f32, &str)> = Vec::new();
        for record in &collection.records {
            let r_norm = similarity::l2_norm(&record.vector);
            if r_norm == 0.0 {
                continue;
            }
            let score = similarity::cosine(vector, &record.vector, q_norm, r_norm);
            scored.push((record.id, score, record.text.as_str()));
        }
        // Descending score; ascending id as a deterministic tie-break.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(limit);
        Ok(scored
            .into_iter()
            .map(|(_, score, text)| SearchHit {
                text: text.to_string(),
                score,
            })
            .collect())
    }
}
