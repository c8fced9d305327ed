//! CLI command implementations

use anyhow::{Context, Result};
use std::process::ExitCode;

use crate::config::Settings;
use crate::hashtags::{append_within_budget, char_len, extract, parse_hashtags, HashtagFormat, HashtagSet};
use crate::llm::prompts::{build_hashtag_prompt, build_story_prompt, build_story_system_prompt};
use crate::llm::{build_provider, GenerationRequest, TextGenerator};
use crate::storage::{append_post, PostRecord};

/// Generate a post and append it to the configured CSV file.
///
/// Provider setup and generation failures are reported and make the run
/// fail. A failed CSV write is reported but the run still counts as a success.
pub async fn generate_post(settings: &Settings, themes: &str, style: &str) -> ExitCode {
    let provider = match build_provider(settings) {
        Ok(provider) => provider,
        Err(e) => {
            println!("Failed to initialize the model:\n{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Using {} provider", provider.name());

    run_with_provider(provider.as_ref(), settings, themes, style).await
}

/// Generate a post with an already built provider and append it to the
/// configured CSV file.
pub async fn run_with_provider(
    generator: &dyn TextGenerator,
    settings: &Settings,
    themes: &str,
    style: &str,
) -> ExitCode {
    let base_tags = base_hashtags(themes, &settings.post.theme_format);

    let post = match compose_post(generator, themes, style, base_tags, settings.post.limit).await {
        Ok(post) => post,
        Err(e) => {
            println!("Failed to generate or prepare the post:\n{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let csv_path = &settings.post.csv_path;
    match append_post(csv_path, &PostRecord::new(themes, style, post.as_str())) {
        Ok(()) => {
            println!("Post saved to {}:", csv_path.display());
            println!();
            println!("{}", post);
        }
        Err(e) => {
            println!("Failed to write the CSV file:\n{:#}", e);
        }
    }

    ExitCode::SUCCESS
}

/// Hashtags derived from the user's themes. A bad format setting is reported
/// and yields no base hashtags.
pub fn base_hashtags(themes: &str, theme_format: &str) -> HashtagSet {
    match parse_hashtags(themes, theme_format) {
        Ok(tags) => {
            tracing::debug!(?tags, "Base hashtags");
            tags
        }
        Err(e) => {
            println!("Failed to parse base hashtags: {}", e);
            HashtagSet::new()
        }
    }
}

/// Ask the generator for a story and hashtags, then assemble the post.
pub async fn compose_post(
    generator: &dyn TextGenerator,
    themes: &str,
    style: &str,
    base_tags: HashtagSet,
    limit: usize,
) -> Result<String> {
    let system = build_story_system_prompt(style);
    let prompt = build_story_prompt(themes);
    let story = generator
        .generate(GenerationRequest::new(&prompt).with_system(&system))
        .await
        .context("Story generation failed")?;

    let story_len = char_len(&story);
    if story_len >= limit {
        anyhow::bail!(
            "Generated story is too long: {} characters, limit is {}",
            story_len,
            limit
        );
    }

    let prompt = build_hashtag_prompt(&story);
    let raw_tags = generator
        .generate(GenerationRequest::new(&prompt))
        .await
        .context("Hashtag generation failed")?;

    let mut tags = base_tags;
    tags.extend(extract(&raw_tags, HashtagFormat::Hash));
    tracing::debug!(count = tags.len(), "Hashtags to place");

    let story = flatten_lines(&story);
    Ok(append_within_budget(story, tags, limit))
}

fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}
