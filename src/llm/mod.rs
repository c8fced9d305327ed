//! LLM module for hashpost
//!
//! Generates stories and hashtags through Gemini or a local Ollama server.

mod client;
mod gemini;
mod ollama;
pub mod prompts;

pub use client::{build_provider, GenerationRequest, TextGenerator};
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
