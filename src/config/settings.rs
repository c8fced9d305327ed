//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Post assembly and output settings
    #[serde(default)]
    pub post: PostSettings,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Sampling parameters shared by all providers
    #[serde(default)]
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSettings {
    /// CSV file that posts are appended to
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Maximum post length in characters (exclusive)
    #[serde(default = "default_post_limit")]
    pub limit: usize,

    /// How themes given on the command line are split into hashtags (comma, space, hash)
    #[serde(default = "default_theme_format")]
    pub theme_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini, ollama)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Upper bound on generated tokens per request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Repetition penalty (ignored by Gemini)
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f64,
}

// Default value functions

fn default_csv_path() -> PathBuf {
    PathBuf::from("generated.csv")
}

fn default_post_limit() -> usize {
    200
}

fn default_theme_format() -> String {
    "comma".to_string()
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_max_output_tokens() -> u32 {
    256
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.9
}

fn default_repetition_penalty() -> f64 {
    1.2
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            limit: default_post_limit(),
            theme_format: default_theme_format(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            repetition_penalty: default_repetition_penalty(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML, filling missing keys with defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("HASHPOST_GEMINI_API_KEY") {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "hashpost", "hashpost")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_pipeline() {
        let settings = Settings::default();
        assert_eq!(settings.post.limit, 200);
        assert_eq!(settings.post.csv_path, PathBuf::from("generated.csv"));
        assert_eq!(settings.post.theme_format, "comma");
        assert_eq!(settings.llm.provider, "gemini");
        assert!(settings.llm.model.is_empty());
        assert_eq!(settings.generation.max_output_tokens, 256);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
[llm]
provider = "ollama"
model = "qwen3:4b"

[post]
limit = 280
"#,
        )
        .unwrap();

        assert_eq!(settings.llm.provider, "ollama");
        assert_eq!(settings.post.limit, 280);
        assert_eq!(settings.post.csv_path, PathBuf::from("generated.csv"));
        assert_eq!(settings.generation.top_p, 0.9);
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(Settings::from_toml("[post]\nlimit = \"many\"").is_err());
    }
}
