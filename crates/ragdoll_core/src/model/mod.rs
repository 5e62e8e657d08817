use serde::{Deserialize, Serialize};

/// Synthetic question plus its reference answer, derived from one page of
/// source text. Both fields are non-empty (enforced at generation time).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// A QA pair plus the answer the retrieval pipeline produced for the same
/// question. `llm_answer` keeps its original wire name so stage files stay
/// readable by earlier tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPairWithAnswer {
    pub question: String,
    pub answer: String,
    #[serde(rename = "llmAnswer")]
    pub llm_answer: String,
}

/// Terminal entity of the evaluation pipeline: a judged answer. Persisted to
/// a timestamped JSONL file and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPairEvaluation {
    pub question: String,
    pub answer: String,
    #[serde(rename = "llmAnswer")]
    pub llm_answer: String,
    /// Bounded to 0..=5 by the judge schema.
    pub score: i64,
    /// One of the fixed reason categories plus a short description.
    pub reason: String,
}
