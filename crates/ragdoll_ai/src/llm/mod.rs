use ragdoll_core::error::AppError;

/// Chat/generation capability. One request, one response; no multi-turn
/// state, no streaming, no retry.
pub trait ChatModel {
    /// Free-text generation. Failure is `GENERATION_FAILED`.
    fn generate(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, AppError>;

    /// Structured-output generation: the backend is constrained to emit JSON
    /// and the raw value is returned for typed decoding by the caller. A
    /// response that is not valid JSON is `GENERATION_SCHEMA_VIOLATION`.
    fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<serde_json::Value, AppError>;
}

pub mod ollama_chat;
