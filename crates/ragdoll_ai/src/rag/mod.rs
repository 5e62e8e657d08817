//! Answer engine: retrieval + prompt assembly + a single generation call.
//!
//! Stateless per call: no conversation memory is kept between questions.

use ragdoll_core::config::Config;
use ragdoll_core::error::AppError;

use crate::embed::Embedder;
use crate::llm::ChatModel;
use crate::vector::{SearchHit, VectorStore};

mod prompts;

pub struct AnswerEngine<'a> {
    embedder: &'a dyn Embedder,
    chat: &'a dyn ChatModel,
    store: &'a dyn VectorStore,
    config: &'a Config,
}

impl<'a> AnswerEngine<'a> {
    pub fn new(
        embedder: &'a dyn Embedder,
        chat: &'a dyn ChatModel,
        store: &'a dyn VectorStore,
        config: &'a Config,
    ) -> Self {
        Self {
            embedder,
            chat,
            store,
            config,
        }
    }

    /// Answer one question from the retrieved context.
    ///
    /// Zero retrieved records still produce an answer (the model falls back
    /// to "I don't know" on an empty context). Embedding or search failure
    /// is `RETRIEVAL_FAILED`; chat failure propagates as `GENERATION_FAILED`.
    pub fn answer(&self, question: &str) -> Result<String, AppError> {
        let query_vector = self
            .embedder
            .embed(&self.config.embedding_model, question)
            .map_err(|e| {
                AppError::new("RETRIEVAL_FAILED", "Failed to embed the question")
                    .with_details(e.to_string())
                    .with_retryable(e.retryable)
            })?;

        let hits = self
            .store
            .search(&self.config.collection_name, &query_vector, self.config.top_k)
            .map_err(|e| {
                AppError::new("RETRIEVAL_FAILED", "Failed to search the vector store")
                    .with_details(e.to_string())
                    .with_retryable(e.retryable)
            })?;

        let context = assemble_context(&hits, self.config.max_context_chars);
        let prompt = prompts::grounded_answer_prompt(&self.config.domain, &context, question);
        self.chat
            .generate(&self.config.llm_model, &prompt, self.config.temperature)
    }
}

/// Join retrieved passages in rank order, separated by a blank line, into
/// one context block capped at `max_chars`. The cap drops whole passages
/// from the tail; the top-ranked passage is always kept.
fn assemble_context(hits: &[SearchHit], max_chars: usize) -> String {
    let mut context = String::new();
    let mut total_chars = 0usize;
    for (i, hit) in hits.iter().enumerate() {
        let passage_chars = hit.text.chars().count();
        if i > 0 && total_chars + 2 + passage_chars > max_chars {
            break;
        }
        if i > 0 {
            context.push_str("\n\n");
            total_chars += 2;
        }
        context.push_str(&hit.text);
        total_chars += passage_chars;
    }
    context
}
