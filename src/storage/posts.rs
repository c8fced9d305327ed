//! Append-only CSV storage for generated posts
//!
//! Rows have three fields (Theme, Style, Post) and no header. A field is
//! quoted only when it contains a comma, a quote or a line break; quotes
//! inside a quoted field are doubled. Rows end with CRLF.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::storage::models::PostRecord;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const TERMINATOR: &str = "\r\n";

/// Append a post as one CSV row, creating the file (and its parent
/// directories) if needed.
pub fn append_post(path: &Path, record: &PostRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_row(&record.fields()).as_bytes())
        .with_context(|| format!("Failed to write CSV row: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;

    tracing::debug!("Appended post to {}", path.display());
    Ok(())
}

/// Render fields as a single CSV row including the line terminator.
pub fn format_row(fields: &[&str]) -> String {
    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            row.push(DELIMITER);
        }
        push_field(&mut row, field);
    }
    row.push_str(TERMINATOR);
    row
}

fn push_field(row: &mut String, field: &str) {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n');

    if !needs_quotes {
        row.push_str(field);
        return;
    }

    row.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            row.push(QUOTE);
        }
        row.push(c);
    }
    row.push(QUOTE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(format_row(&["кот", "нуар", "Пост #кот"]), "кот,нуар,Пост #кот\r\n");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(format_row(&["кот, пёс", "x", "y"]), "\"кот, пёс\",x,y\r\n");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(format_row(&["a", "say \"hi\"", "b"]), "a,\"say \"\"hi\"\"\",b\r\n");
    }

    #[test]
    fn empty_fields_stay_empty() {
        assert_eq!(format_row(&["", "", ""]), ",,\r\n");
    }

    #[test]
    fn appends_rows_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("posts.csv");

        append_post(&path, &PostRecord::new("кот,пёс", "сказка", "Жил-был кот. #кот")).unwrap();
        append_post(&path, &PostRecord::new("море", "нуар", "Волны. #море")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "\"кот,пёс\",сказка,Жил-был кот. #кот\r\nморе,нуар,Волны. #море\r\n"
        );
    }

    #[test]
    fn reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let err = append_post(dir.path(), &PostRecord::new("a", "b", "c")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
