//! The four file-backed evaluation stages. Each stage reads its
//! predecessor's persisted JSONL as its sole input and writes its own output
//! as a whole-file replacement, so a failed stage never corrupts the next
//! stage's input. Stage outputs are persisted in input order.

use std::path::{Path, PathBuf};

use ragdoll_core::config::Config;
use ragdoll_core::document::PageSource;
use ragdoll_core::error::AppError;
use ragdoll_core::files;
use ragdoll_core::model::{QaPair, QaPairEvaluation, QaPairWithAnswer};
use ragdoll_core::report::render_report;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::embed::Embedder;
use crate::eval::{collect_answers, generate_qa_pairs, judge_answer};
use crate::llm::ChatModel;
use crate::rag::AnswerEngine;
use crate::vector::VectorStore;

pub const QA_PAIRS_FILE: &str = "qa_pairs.jsonl";
pub const LLM_ANSWERS_FILE: &str = "llm_answers_qa_pairs.jsonl";
pub const JUDGE_RESULTS_SUFFIX: &str = "_judge_results.jsonl";
pub const REPORT_SUFFIX: &str = "_evaluation_report.md";

pub struct Pipeline<'a> {
    config: &'a Config,
    embedder: &'a dyn Embedder,
    chat: &'a dyn ChatModel,
    store: &'a dyn VectorStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        embedder: &'a dyn Embedder,
        chat: &'a dyn ChatModel,
        store: &'a dyn VectorStore,
    ) -> Self {
        Self {
            config,
            embedder,
            chat,
            store,
        }
    }

    fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.data_dir)
    }

    fn qa_pairs_dir(&self) -> PathBuf {
        self.data_dir().join("qa_pairs")
    }

    fn llm_answers_dir(&self) -> PathBuf {
        self.data_dir().join("llm_answers")
    }

    fn evaluation_dir(&self) -> PathBuf {
        self.data_dir().join("evaluation")
    }

    fn report_dir(&self) -> PathBuf {
        self.data_dir().join("report")
    }

    /// Stage 1: generate QA pairs from every page of the source document.
    ///
    /// A page whose structured response violates the schema is logged and
    /// skipped; the stage fails only when no pages could be loaded at all.
    pub fn prepare_qa_pairs(&self, pages: &dyn PageSource) -> Result<PathBuf, AppError> {
        let pages = pages.load_pages()?;
        info!(pages = pages.len(), "generating QA pairs");

        let mut all_pairs: Vec<QaPair> = Vec::new();
        for (i, page_text) in pages.iter().enumerate() {
            match generate_qa_pairs(
                self.chat,
                &self.config.llm_model,
                &self.config.domain,
                page_text,
                self.config.qa_pairs_per_page,
                self.config.temperature,
            ) {
                Ok(pairs) => {
                    info!(page = i + 1, pairs = pairs.len(), "page processed");
                    all_pairs.extend(pairs);
                }
                Err(e) => warn!(page = i + 1, error = %e, "skipping page after generation failure"),
            }
        }

        let path = files::write_jsonl(&self.qa_pairs_dir(), QA_PAIRS_FILE, &all_pairs)?;
        info!(total = all_pairs.len(), path = %path.display(), "QA pairs written");
        Ok(path)
    }

    /// Stage 2: answer every stage-1 question through the answer engine.
    pub fn prepare_llm_answers(&self) -> Result<PathBuf, AppError> {
        let input = self.qa_pairs_dir().join(QA_PAIRS_FILE);
        let pairs: Vec<QaPair> = files::read_jsonl(&input)?;
        info!(pairs = pairs.len(), "collecting answers");

        let engine = AnswerEngine::new(self.embedder, self.chat, self.store, self.config);
        let answers = collect_answers(&engine, &pairs);

        let path = files::write_jsonl(&self.llm_answers_dir(), LLM_ANSWERS_FILE, &answers)?;
        info!(total = answers.len(), path = %path.display(), "answers written");
        Ok(path)
    }

    /// Stage 3: judge every stage-2 answer against its reference. The output
    /// file name carries a unix-timestamp prefix so prior runs survive.
    pub fn evaluate(&self) -> Result<PathBuf, AppError> {
        let input = self.llm_answers_dir().join(LLM_ANSWERS_FILE);
        let answers: Vec<QaPairWithAnswer> = files::read_jsonl(&input)?;
        info!(answers = answers.len(), "judging answers");

        let mut results: Vec<QaPairEvaluation> = Vec::new();
        for (i, item) in answers.iter().enumerate() {
            match judge_answer(
                self.chat,
                &self.config.llm_model,
                &self.config.domain,
                item,
                self.config.temperature,
            ) {
                Ok(evaluation) => {
                    info!(item = i + 1, score = evaluation.score, "item judged");
                    results.push(evaluation);
                }
                Err(e) => warn!(item = i + 1, question = %item.question, error = %e, "skipping item after judge failure"),
            }
        }

        let file_name = files::unique_file_name(JUDGE_RESULTS_SUFFIX.trim_start_matches('_'));
        let path = files::write_jsonl(&self.evaluation_dir(), &file_name, &results)?;
        match average_score(&results) {
            Some(avg) => info!(total = results.len(), average = avg, "evaluation complete"),
            None => info!(total = 0usize, "evaluation complete; nothing to average"),
        }
        Ok(path)
    }

    /// Stage 4: render the newest evaluation file into a Markdown report
    /// sharing that file's timestamp prefix.
    pub fn report(&self) -> Result<PathBuf, AppError> {
        let newest = files::newest_matching(&self.evaluation_dir(), JUDGE_RESULTS_SUFFIX)?
            .ok_or_else(|| {
                AppError::new("IO_MISSING_INPUT", "No evaluation results found")
                    .with_details(format!("dir={}", self.evaluation_dir().display()))
            })?;
        let results: Vec<QaPairEvaluation> = files::read_jsonl(&newest)?;
        info!(results = results.len(), input = %newest.display(), "building report");

        let generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        let report = render_report(&results, &generated_at);

        let report_name = format!("{}{REPORT_SUFFIX}", timestamp_prefix(&newest));
        let path = files::write_text(&self.report_dir(), &report_name, &report)?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }

    /// Run all four stages in sequence, stopping at the first failure.
    pub fn run_all(&self, pages: &dyn PageSource) -> Result<PathBuf, AppError> {
        self.prepare_qa_pairs(pages)?;
        self.prepare_llm_answers()?;
        self.evaluate()?;
        self.report()
    }
}

fn average_score(results: &[QaPairEvaluation]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let sum: i64 = results.iter().map(|r| r.score).sum();
    Some(sum as f64 / results.len() as f64)
}

/// Leading `<unix_ts>` of a timestamped stage file name.
fn timestamp_prefix(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('_').next())
        .unwrap_or("0")
        .to_string()
}
