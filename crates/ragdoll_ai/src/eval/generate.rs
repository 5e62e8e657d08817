use ragdoll_core::error::AppError;
use ragdoll_core::model::QaPair;
use serde::Deserialize;

use super::prompts;
use crate::llm::ChatModel;

#[derive(Debug, Deserialize)]
struct QaPairPayload {
    question: String,
    answer: String,
}

#[derive(Debug, Deserialize)]
struct QaPairListPayload {
    qa_pairs: Vec<QaPairPayload>,
}

/// Generate up to `max_pairs` QA pairs from one page of source text via a
/// single structured-output request.
///
/// A malformed or schema-violating response is `GENERATION_SCHEMA_VIOLATION`
/// and aborts this page's contribution; the caller decides whether to
/// continue with the next page. No cross-page deduplication happens here.
pub fn generate_qa_pairs(
    chat: &dyn ChatModel,
    model: &str,
    domain: &str,
    page_text: &str,
    max_pairs: usize,
    temperature: f32,
) -> Result<Vec<QaPair>, AppError> {
    let prompt = prompts::qa_generation_prompt(domain, page_text, max_pairs);
    let value = chat.generate_json(model, &prompt, temperature)?;
    let payload: QaPairListPayload = serde_json::from_value(value).map_err(|e| {
        AppError::new(
            "GENERATION_SCHEMA_VIOLATION",
            "QA generation response did not match the expected schema",
        )
        .with_details(e.to_string())
    })?;

    let mut pairs = Vec::new();
    for item in payload.qa_pairs {
        if item.question.trim().is_empty() || item.answer.trim().is_empty() {
            return Err(AppError::new(
                "GENERATION_SCHEMA_VIOLATION",
                "QA pair contained an empty question or answer",
            ));
        }
        pairs.push(QaPair {
            question: item.question,
            answer: item.answer,
        });
    }
    pairs.truncate(max_pairs);
    Ok(pairs)
}
