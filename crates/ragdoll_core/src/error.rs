use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape used across the pipeline.
///
/// `code` is a stable machine-readable identifier (e.g. `EMBEDDING_FAILED`,
/// `VECTOR_STORE_DIM_MISMATCH`); `details` carries item context for batch
/// diagnostics; `retryable` marks transport-level failures a caller may
/// choose to retry externally (the core never retries).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
