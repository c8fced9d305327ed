//! Storage module for hashpost
//!
//! Appends generated posts to a header-less CSV file.

mod models;
mod posts;

pub use models::PostRecord;
pub use posts::{append_post, format_row};
