use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::ollama::OllamaClient;

/// Text generation request payload.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Optional system instruction
    pub system: Option<&'a str>,
    pub prompt: &'a str,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            system: None,
            prompt,
        }
    }

    pub fn with_system(mut self, system: &'a str) -> Self {
        self.system = Some(system);
        self
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Build a text generation provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn TextGenerator>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        "ollama" => Ok(Box::new(OllamaClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini, ollama",
            other
        ),
    }
}
