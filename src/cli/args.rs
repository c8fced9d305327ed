//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;

/// hashpost - Short social-media stories with hashtags, written by an LLM
#[derive(Parser, Debug)]
#[command(name = "hashpost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Themes for the post, comma-separated. Use quotes.
    pub themes: String,

    /// Writing style of the post
    pub style: String,

    /// CSV file that posts are appended to [default: generated.csv]
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Maximum post length in characters, hashtags included
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// LLM provider (gemini, ollama)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model name for the selected provider
    #[arg(short, long)]
    pub model: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Override configured values with the ones given on the command line
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(csv) = &self.csv {
            settings.post.csv_path = csv.clone();
        }
        if let Some(limit) = self.limit {
            settings.post.limit = limit;
        }
        if let Some(provider) = &self.provider {
            settings.llm.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            settings.llm.model = model.clone();
        }
    }
}
