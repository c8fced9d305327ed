//! Configuration module for hashpost
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{GenerationSettings, LlmSettings, PostSettings, Settings};
