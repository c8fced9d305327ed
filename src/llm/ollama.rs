use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{GenerationSettings, Settings};
use crate::llm::client::{GenerationRequest, TextGenerator};

const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "qwen3:4b";

/// Client for a local Ollama server
pub struct OllamaClient {
    http: Client,
    model: String,
    endpoint: String,
    generation: GenerationSettings,
}

impl OllamaClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_OLLAMA_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_OLLAMA_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            // Local models on CPU can be slow to answer.
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .context("Failed to build Ollama HTTP client")?,
            model,
            endpoint,
            generation: settings.generation.clone(),
        })
    }

    fn request_url(&self) -> String {
        format!("{}/api/chat", self.endpoint)
    }

    fn build_body<'a>(&'a self, request: GenerationRequest<'a>) -> OllamaChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(OllamaMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(OllamaMessage {
            role: "user",
            content: request.prompt,
        });

        OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: self.generation.temperature,
                top_p: self.generation.top_p,
                repeat_penalty: self.generation.repetition_penalty,
                num_predict: self.generation.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let body = self.build_body(request);

        tracing::debug!(model = %self.model, prompt_len = request.prompt.len(), "Sending Ollama request");

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Ollama request to {} failed", self.endpoint))?;

        let response = response
            .error_for_status()
            .context("Ollama returned an error status")?;

        let payload: OllamaChatResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        let text = payload.message.content.trim();
        if text.is_empty() {
            anyhow::bail!("Ollama response did not contain any text");
        }

        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f64,
    top_p: f64,
    repeat_penalty: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}
