//! hashpost - Short social-media stories with hashtags
//!
//! Entry point for the hashpost CLI application.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hashpost::cli::Cli;
use hashpost::config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration, then let flags override it
    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            println!("Failed to load configuration:\n{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_to(&mut settings);

    hashpost::cli::commands::generate_post(&settings, &cli.themes, &cli.style).await
}
