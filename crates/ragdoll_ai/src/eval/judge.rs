use ragdoll_core::error::AppError;
use ragdoll_core::model::{QaPairEvaluation, QaPairWithAnswer};
use serde::Deserialize;

use super::prompts;
use crate::llm::ChatModel;

#[derive(Debug, Deserialize)]
struct JudgeVerdict {
    score: i64,
    reason: String,
}

/// Score one generated answer against its reference via a single
/// structured-output request.
///
/// The verdict schema bounds the score to 0..=5; any out-of-range integer,
/// empty reason, or undecodable shape is `JUDGE_SCHEMA_VIOLATION` (not a
/// clamp-and-continue).
pub fn judge_answer(
    chat: &dyn ChatModel,
    model: &str,
    domain: &str,
    item: &QaPairWithAnswer,
    temperature: f32,
) -> Result<QaPairEvaluation, AppError> {
    let prompt = prompts::judge_prompt(domain, &item.question, &item.llm_answer, &item.answer);
    let value = chat
        .generate_json(model, &prompt, temperature)
        .map_err(|e| {
            if e.code == "GENERATION_SCHEMA_VIOLATION" {
                AppError::new("JUDGE_SCHEMA_VIOLATION", "Judge response was not valid JSON")
                    .with_details(e.details.unwrap_or_default())
            } else {
                e
            }
        })?;
    let verdict: JudgeVerdict = serde_json::from_value(value).map_err(|e| {
        AppError::new(
            "JUDGE_SCHEMA_VIOLATION",
            "Judge response did not match the verdict schema",
        )
        .with_details(e.to_string())
    })?;

    if !(0..=5).contains(&verdict.score) {
        return Err(AppError::new(
            "JUDGE_SCHEMA_VIOLATION",
            "Judge score is outside the 0..=5 range",
        )
        .with_details(format!("score={}", verdict.score)));
    }
    if verdict.reason.trim().is_empty() {
        return Err(AppError::new(
            "JUDGE_SCHEMA_VIOLATION",
            "Judge reason must not be empty",
        ));
    }

    Ok(QaPairEvaluation {
        question: item.question.clone(),
        answer: item.answer.clone(),
        llm_answer: item.llm_answer.clone(),
        score: verdict.score,
        reason: verdict.reason,
    })
}
