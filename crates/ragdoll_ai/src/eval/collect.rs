use ragdoll_core::model::{QaPair, QaPairWithAnswer};
use tracing::warn;

use crate::rag::AnswerEngine;

/// Run the answer engine over a batch of QA pairs, pairing each generated
/// answer with its question and reference answer.
///
/// Per-item failures are logged and skipped, so the output may be shorter
/// than the input. Results are in input order.
pub fn collect_answers(engine: &AnswerEngine<'_>, pairs: &[QaPair]) -> Vec<QaPairWithAnswer> {
    let mut out = Vec::with_capacity(pairs.len());
    for (i, pair) in pairs.iter().enumerate() {
        match engine.answer(&pair.question) {
            Ok(llm_answer) => out.push(QaPairWithAnswer {
                question: pair.question.clone(),
                answer: pair.answer.clone(),
                llm_answer,
            }),
            Err(e) => warn!(
                item = i,
                question = %pair.question,
                error = %e,
                "skipping question after answer failure"
            ),
        }
    }
    out
}
