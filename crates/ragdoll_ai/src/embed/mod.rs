use ragdoll_core::error::AppError;

/// Embedding capability: given text, return a dense vector of fixed
/// dimension for the given model. Single blocking attempt, no retry.
pub trait Embedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError>;
}

pub mod ollama_embed;
