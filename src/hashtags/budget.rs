//! Budget-limited hashtag appending

/// Length in characters, the unit the post limit is measured in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Append hashtags to `text`, each preceded by a space, while the result stays
/// strictly shorter than `limit` characters.
///
/// The collection is consumed. Tags are tried in iteration order and appending
/// stops at the first tag that does not fit; the remaining tags are dropped,
/// even ones short enough to fit. For a [`HashtagSet`](super::HashtagSet) the
/// order is lexicographic.
pub fn append_within_budget<I>(text: impl Into<String>, hashtags: I, limit: usize) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut text = text.into();
    let mut len = char_len(&text);

    for tag in hashtags {
        let tag_len = char_len(&tag);
        if len + tag_len + 1 >= limit {
            tracing::debug!(tag = %tag, len, limit, "Hashtag budget exhausted");
            break;
        }
        text.push(' ');
        text.push_str(&tag);
        len += tag_len + 1;
    }

    text
}
