//! hashpost - A CLI tool that writes short social-media stories with an LLM
//! and appends them, hashtags included, to a CSV file

pub mod cli;
pub mod config;
pub mod hashtags;
pub mod llm;
pub mod storage;
