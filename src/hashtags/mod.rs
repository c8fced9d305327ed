//! Hashtag module for hashpost
//!
//! Extracts hashtags from raw text and appends them to a post within a
//! character budget.

mod budget;
mod extract;

pub use budget::{append_within_budget, char_len};
pub use extract::{extract, parse_hashtags, HashtagError, HashtagFormat, HashtagSet};
