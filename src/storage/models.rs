//! Data models for storage

/// A generated post together with the input it was generated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// Themes as typed by the user
    pub theme: String,

    /// Style as typed by the user
    pub style: String,

    /// Final story with hashtags
    pub post: String,
}

impl PostRecord {
    pub fn new(theme: impl Into<String>, style: impl Into<String>, post: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            style: style.into(),
            post: post.into(),
        }
    }

    /// Fields in column order: Theme, Style, Post
    pub fn fields(&self) -> [&str; 3] {
        [&self.theme, &self.style, &self.post]
    }
}
