//! Evaluation primitives: synthetic QA generation, answer collection, and
//! LLM-as-judge scoring. File-backed orchestration lives in `pipeline`.

mod collect;
mod generate;
mod judge;
mod prompts;

pub use collect::collect_answers;
pub use generate::generate_qa_pairs;
pub use judge::judge_answer;
