use std::time::Duration;

use ragdoll_core::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin client for an Ollama-compatible backend. Holds only the base URL;
/// each call is a single blocking request with its own timeout.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "Ollama base URL must be an http(s) URL",
            )
            .with_details(format!("base_url={base_url}")));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = ureq::get(&url)
            .timeout(Duration::from_millis(800))
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("GENERATION_FAILED", "Ollama health check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(AppError::new("GENERATION_FAILED", "Failed to reach Ollama")
                .with_details(e.to_string())
                .with_retryable(true)),
        }
    }

    /// POST a JSON body and decode a JSON response. `code` and `what` shape
    /// the error taxonomy for the calling gateway.
    pub(crate) fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Serialize,
        timeout: Duration,
        code: &str,
        what: &str,
    ) -> Result<T, AppError> {
        let url = format!("{}{path}", self.base_url);
        let resp = ureq::post(&url).timeout(timeout).send_json(body);

        match resp {
            Ok(r) if r.status() == 200 => r.into_json().map_err(|e| {
                AppError::new(code, format!("Failed to decode {what} response"))
                    .with_details(e.to_string())
            }),
            Ok(r) => Err(AppError::new(code, format!("{what} request failed"))
                .with_details(format!("status={}", r.status()))),
            Err(ureq::Error::Status(status, _)) => {
                Err(AppError::new(code, format!("{what} request failed"))
                    .with_details(format!("status={status}")))
            }
            Err(e) => Err(AppError::new(code, format!("Failed to call {what} endpoint"))
                .with_details(e.to_string())
                .with_retryable(true)),
        }
    }
}
