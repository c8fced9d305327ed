//! Hashtag extraction from raw strings

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Unique hashtags, iterated in lexicographic order.
pub type HashtagSet = BTreeSet<String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashtagError {
    #[error("Unsupported hashtag format '{0}'. Supported formats: comma, space, hash")]
    UnsupportedFormat(String),
}

/// Convention used to split raw text into hashtags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashtagFormat {
    /// Comma-separated words, e.g. "cats, dogs". Every piece gets a `#`.
    Comma,
    /// Whitespace-separated words, with or without a leading `#`.
    Space,
    /// Whitespace-separated text; only words already starting with `#` count.
    Hash,
}

impl HashtagFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Space => "space",
            Self::Hash => "hash",
        }
    }
}

impl FromStr for HashtagFormat {
    type Err = HashtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" => Ok(Self::Comma),
            "space" => Ok(Self::Space),
            "hash" => Ok(Self::Hash),
            other => Err(HashtagError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for HashtagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract hashtags from `raw` according to `format`.
///
/// The comma format always prepends `#`, so a piece that already starts with
/// one comes out as `##tag`.
pub fn extract(raw: &str, format: HashtagFormat) -> HashtagSet {
    if raw.is_empty() {
        return HashtagSet::new();
    }

    match format {
        HashtagFormat::Comma => raw
            .split(',')
            .map(|piece| {
                let word: String = piece.chars().filter(|c| !c.is_whitespace()).collect();
                format!("#{}", word)
            })
            .collect(),
        HashtagFormat::Space => raw
            .split_whitespace()
            .map(|token| format!("#{}", token.strip_prefix('#').unwrap_or(token)))
            .collect(),
        HashtagFormat::Hash => raw
            .split_whitespace()
            .filter(|token| token.starts_with('#'))
            .map(str::to_string)
            .collect(),
    }
}

/// Extract hashtags using a format given by name ("comma", "space" or "hash").
pub fn parse_hashtags(raw: &str, mode: &str) -> Result<HashtagSet, HashtagError> {
    let format = mode.parse::<HashtagFormat>()?;
    Ok(extract(raw, format))
}
