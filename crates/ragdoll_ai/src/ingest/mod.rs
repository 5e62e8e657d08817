//! Ingestion path: document text -> chunks -> embeddings -> a freshly
//! rebuilt vector collection. Ingestion is a destructive replace of the
//! named collection, never an additive merge.

use ragdoll_core::chunk::split_text;
use ragdoll_core::config::Config;
use ragdoll_core::error::AppError;
use tracing::info;

use crate::embed::Embedder;
use crate::vector::{VectorRecord, VectorStore};

/// Delete any existing collection of this name, create a new one with the
/// dimension of the first record, and bulk-insert all records.
///
/// Fails with `VECTOR_STORE_EMPTY_BATCH` when `records` is empty (the
/// dimension cannot be inferred) and `VECTOR_STORE_DIM_MISMATCH` when any
/// record disagrees with the first.
pub fn rebuild_collection(
    store: &dyn VectorStore,
    name: &str,
    records: &[VectorRecord],
) -> Result<(), AppError> {
    let first = records.first().ok_or_else(|| {
        AppError::new(
            "VECTOR_STORE_EMPTY_BATCH",
            "Cannot rebuild a collection from zero records",
        )
        .with_details(format!("collection={name}"))
    })?;
    let dims = first.vector.len();
    for record in records {
        if record.vector.len() != dims {
            return Err(AppError::new(
                "VECTOR_STORE_DIM_MISMATCH",
                "Record dimension disagrees with the first record",
            )
            .with_details(format!(
                "id={}; expected={dims}; got={}",
                record.id,
                record.vector.len()
            )));
        }
    }

    if store.list_collections()?.iter().any(|c| c == name) {
        info!(collection = name, "deleting existing collection");
        store.delete_collection(name)?;
    }
    store.create_collection(name, dims)?;
    info!(collection = name, records = records.len(), "bulk inserting records");
    store.upsert(name, records)
}

/// Full ingestion run over one document's text. Returns the number of
/// records inserted. Zero chunks is fatal: an empty collection is
/// meaningless.
pub fn ingest_text(
    config: &Config,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
    text: &str,
) -> Result<usize, AppError> {
    let chunks = split_text(text, config.chunk_size, config.chunk_overlap)?;
    if chunks.is_empty() {
        return Err(AppError::new(
            "VECTOR_STORE_EMPTY_BATCH",
            "Document produced no chunks",
        ));
    }

    let mut records = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        info!(chunk = i + 1, total = chunks.len(), "embedding chunk");
        let vector = embedder.embed(&config.embedding_model, chunk)?;
        records.push(VectorRecord {
            id: i as u64,
            vector,
            text: chunk.clone(),
        });
    }

    rebuild_collection(store, &config.collection_name, &records)?;
    Ok(records.len())
}
