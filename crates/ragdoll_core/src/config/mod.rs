use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Deployment configuration with compiled-in defaults.
///
/// Every field has a default so a partial TOML file (or none at all) is
/// enough to run against a local Ollama + Qdrant setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat model used for answering, QA generation and judging.
    pub llm_model: String,
    pub embedding_model: String,
    pub ollama_url: String,
    pub qdrant_url: String,
    pub collection_name: String,
    /// Short description of the corpus domain, spliced into prompts.
    pub domain: String,
    /// Source document as a UTF-8 text file; pages separated by form feed.
    pub source_document: String,
    /// Root directory for the evaluation stage files.
    pub data_dir: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    /// Character budget for the retrieved context block. Truncation drops
    /// whole passages from the tail, never mid-passage.
    pub max_context_chars: usize,
    pub qa_pairs_per_page: usize,
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_model: "llama3.2".to_string(),
            embedding_model: "mxbai-embed-large".to_string(),
            ollama_url: "http://127.0.0.1:11434".to_string(),
            qdrant_url: "http://127.0.0.1:6333".to_string(),
            collection_name: "cats_rheology".to_string(),
            domain: "the rheology of cats".to_string(),
            source_document: "on-the-rheology-of-cats.txt".to_string(),
            data_dir: "evaluation/data".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
            max_context_chars: 24_000,
            qa_pairs_per_page: 3,
            temperature: 0.2,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::new("CONFIG_INVALID", "Failed to read config file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        let cfg: Config = toml::from_str(&raw).map_err(|e| {
            AppError::new("CONFIG_INVALID", "Failed to decode config file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.chunk_size == 0 {
            return Err(AppError::new("CONFIG_INVALID", "chunk_size must be positive"));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(
                AppError::new("CONFIG_INVALID", "chunk_overlap must be smaller than chunk_size")
                    .with_details(format!(
                        "chunk_size={}; chunk_overlap={}",
                        self.chunk_size, self.chunk_overlap
                    )),
            );
        }
        if self.top_k == 0 {
            return Err(AppError::new("CONFIG_INVALID", "top_k must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::Config;

    #[test]
    fn defaults_match_the_reference_deployment() {
        let cfg = Config::default();
        assert_eq!(cfg.llm_model, "llama3.2");
        assert_eq!(cfg.embedding_model, "mxbai-embed-large");
        assert_eq!(cfg.collection_name, "cats_rheology");
        assert_eq!(cfg.chunk_size, 1000);
        assert_eq!(cfg.chunk_overlap, 200);
        assert_eq!(cfg.top_k, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(f, "collection_name = \"fluid_dynamics\"\ntop_k = 3").expect("write");
        let cfg = Config::load(f.path()).expect("load");
        assert_eq!(cfg.collection_name, "fluid_dynamics");
        assert_eq!(cfg.top_k, 3);
        assert_eq!(cfg.llm_model, "llama3.2");
    }

    #[test]
    fn rejects_overlap_not_smaller_than_chunk_size() {
        let cfg = Config {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Config::default()
        };
        let err = cfg.validate().expect_err("should fail");
        assert_eq!(err.code, "CONFIG_INVALID");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(std::path::Path::new("/nonexistent/ragdoll.toml"))
            .expect_err("should fail");
        assert_eq!(err.code, "CONFIG_INVALID");
    }
}
