use std::time::Duration;

use ragdoll_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::ollama::OllamaClient;

/// Character cap on a single embeddings request. Chunking keeps inputs well
/// under this; the guard only protects against pathological callers.
const MAX_INPUT_CHARS: usize = 12_000;

#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: OllamaClient,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        let prompt = truncate_chars(input, MAX_INPUT_CHARS);
        let resp: EmbeddingsResponse = self.client.post_json(
            "/api/embeddings",
            EmbeddingsRequest { model, prompt },
            Duration::from_secs(30),
            "EMBEDDING_FAILED",
            "embeddings",
        )?;
        if resp.embedding.is_empty() {
            return Err(AppError::new(
                "EMBEDDING_FAILED",
                "Embeddings response was empty",
            ));
        }
        Ok(resp.embedding)
    }
}

/// Truncate to at most `max_chars` characters on a char boundary.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        // Multibyte input must not be cut mid-character.
        assert_eq!(truncate_chars("แมวเหลว", 3), "แมว");
    }
}
