use std::time::Duration;

use ragdoll_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::ChatModel;
use crate::ollama::OllamaClient;

#[derive(Debug, Clone)]
pub struct OllamaChat {
    client: OllamaClient,
}

impl OllamaChat {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    fn chat(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        format: Option<&str>,
        code: &str,
    ) -> Result<String, AppError> {
        let req = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            format,
            options: ChatOptions { temperature },
        };
        let resp: ChatResponse = self.client.post_json(
            "/api/chat",
            req,
            Duration::from_secs(120),
            code,
            "chat",
        )?;
        if resp.message.content.trim().is_empty() {
            return Err(AppError::new(code, "Chat response was empty"));
        }
        Ok(resp.message.content)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    options: ChatOptions,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

impl ChatModel for OllamaChat {
    fn generate(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, AppError> {
        self.chat(model, prompt, temperature, None, "GENERATION_FAILED")
    }

    fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<serde_json::Value, AppError> {
        let content = self.chat(model, prompt, temperature, Some("json"), "GENERATION_FAILED")?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::new(
                "GENERATION_SCHEMA_VIOLATION",
                "Structured output was not valid JSON",
            )
            .with_details(e.to_string())
        })
    }
}
