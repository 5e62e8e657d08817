use std::fs;
use std::path::PathBuf;

use crate::error::AppError;

/// Page extraction seam. PDF (or any other format) extraction lives behind
/// this trait; the pipeline only ever sees an ordered sequence of page texts.
pub trait PageSource {
    fn load_pages(&self) -> Result<Vec<String>, AppError>;
}

/// Page source backed by a UTF-8 text file. Pages are separated by form-feed
/// characters; a file without form feeds is a single page. Blank pages are
/// skipped, matching extractor behavior for empty PDF pages.
#[derive(Debug, Clone)]
pub struct TextFilePages {
    path: PathBuf,
}

impl TextFilePages {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for TextFilePages {
    fn load_pages(&self) -> Result<Vec<String>, AppError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AppError::new("IO_MISSING_INPUT", "Failed to read source document")
                .with_details(format!("path={}; err={}", self.path.display(), e))
        })?;
        Ok(raw
            .split('\u{0C}')
            .filter(|page| !page.trim().is_empty())
            .map(|page| page.to_string())
            .collect())
    }
}
