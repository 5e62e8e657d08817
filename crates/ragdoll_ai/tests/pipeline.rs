use pretty_assertions::assert_eq;
use ragdoll_ai::embed::Embedder;
use ragdoll_ai::llm::ChatModel;
use ragdoll_ai::pipeline::{Pipeline, LLM_ANSWERS_FILE, QA_PAIRS_FILE};
use ragdoll_ai::vector::MemoryStore;
use ragdoll_core::config::Config;
use ragdoll_core::document::PageSource;
use ragdoll_core::error::AppError;
use ragdoll_core::files::read_jsonl;
use ragdoll_core::model::{QaPair, QaPairEvaluation, QaPairWithAnswer};
use serde_json::json;

struct StaticPages {
    pages: Vec<String>,
}

impl PageSource for StaticPages {
    fn load_pages(&self) -> Result<Vec<String>, AppError> {
        Ok(self.pages.clone())
    }
}

struct UnitEmbedder;

impl Embedder for UnitEmbedder {
    fn embed(&self, _model: &str, _input: &str) -> Result<Vec<f32>, AppError> {
        Ok(vec![1.0, 0.0])
    }
}

/// Chat mock that plays all three roles: QA generation and judging via the
/// structured path, grounded answering via the free-text path.
struct ScriptedChat;

impl ChatModel for ScriptedChat {
    fn generate(&self, _model: &str, _prompt: &str, _temperature: f32) -> Result<String, AppError> {
        Ok("A grounded answer.".to_string())
    }

    fn generate_json(
        &self,
        _model: &str,
        prompt: &str,
        _temperature: f32,
    ) -> Result<serde_json::Value, AppError> {
        if prompt.contains("qa_pairs") {
            if prompt.contains("unparseable page") {
                return Err(AppError::new(
                    "GENERATION_SCHEMA_VIOLATION",
                    "mock refuses this page",
                ));
            }
            Ok(json!({"qa_pairs": [{
                "question": "What does the page state?",
                "answer": "The page states a fact."
            }]}))
        } else {
            Ok(json!({"score": 4, "reason": "Accurate - covers the reference"}))
        }
    }
}

fn test_config(dir: &tempfile::TempDir) -> Config {
    Config {
        data_dir: dir.path().join("data").to_string_lossy().into_owned(),
        ..Config::default()
    }
}

#[test]
fn full_pipeline_produces_all_four_stage_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir);
    let store = MemoryStore::new();
    let pipeline = Pipeline::new(&config, &UnitEmbedder, &ScriptedChat, &store);
    let pages = StaticPages {
        pages: vec!["page one text".to_string(), "page two text".to_string()],
    };

    let report_path = pipeline.run_all(&pages).expect("pipeline");

    let data = dir.path().join("data");
    let qa_pairs: Vec<QaPair> =
        read_jsonl(&data.join("qa_pairs").join(QA_PAIRS_FILE)).expect("qa pairs");
    assert_eq!(qa_pairs.len(), 2);

    let answers: Vec<QaPairWithAnswer> =
        read_jsonl(&data.join("llm_answers").join(LLM_ANSWERS_FILE)).expect("answers");
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].llm_answer, "A grounded answer.");

    let report = std::fs::read_to_string(&report_path).expect("report");
    assert!(report.contains("- **Questions Tested:** 2"));
    assert!(report.contains("- **Average Score:** 4.0/5"));
    assert!(report.contains("**Excellent**"));
}

#[test]
fn evaluate_writes_a_uniquely_timestamped_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir);
    let store = MemoryStore::new();
    let pipeline = Pipeline::new(&config, &UnitEmbedder, &ScriptedChat, &store);
    let pages = StaticPages {
        pages: vec!["only page".to_string()],
    };

    pipeline.prepare_qa_pairs(&pages).expect("stage 1");
    pipeline.prepare_llm_answers().expect("stage 2");
    let path = pipeline.evaluate().expect("stage 3");

    let name = path.file_name().and_then(|n| n.to_str()).expect("name");
    assert!(name.ends_with("_judge_results.jsonl"));
    let prefix = name.split('_').next().expect("prefix");
    assert!(prefix.parse::<i64>().is_ok());

    let results: Vec<QaPairEvaluation> = read_jsonl(&path).expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 4);
}

#[test]
fn a_schema_violating_page_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir);
    let store = MemoryStore::new();
    let pipeline = Pipeline::new(&config, &UnitEmbedder, &ScriptedChat, &store);
    let pages = StaticPages {
        pages: vec![
            "a perfectly fine page".to_string(),
            "unparseable page content".to_string(),
        ],
    };

    let path = pipeline.prepare_qa_pairs(&pages).expect("stage 1");
    let qa_pairs: Vec<QaPair> = read_jsonl(&path).expect("qa pairs");
    assert_eq!(qa_pairs.len(), 1);
}

#[test]
fn stages_fail_fast_when_their_input_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir);
    let store = MemoryStore::new();
    let pipeline = Pipeline::new(&config, &UnitEmbedder, &ScriptedChat, &store);

    let err = pipeline.prepare_llm_answers().expect_err("no stage-1 file");
    assert_eq!(err.code, "IO_MISSING_INPUT");

    let err = pipeline.evaluate().expect_err("no stage-2 file");
    assert_eq!(err.code, "IO_MISSING_INPUT");

    let err = pipeline.report().expect_err("no stage-3 file");
    assert_eq!(err.code, "IO_MISSING_INPUT");
}
