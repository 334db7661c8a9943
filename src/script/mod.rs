//! Low-level handling of Paradox script text.
//!
//! Everything here is a pure text transform except [`read_source`]. The
//! record parser in [`crate::parser`] builds on these pieces:
//!
//! - [`decode_source`] / [`read_source`] - tolerant decoding of raw file bytes
//! - [`strip_comments`] - removes `#` line comments before any parsing
//! - [`extract_block`] - returns the body of a brace-delimited block using
//!   depth counting
//!
//! # Examples
//!
//! ```rust
//! use techtree_cli::script::{extract_block, strip_comments};
//!
//! let text = strip_comments("tech_a = { tier = 1 # trailing\n}\n");
//! let open = text.find('{').unwrap() + 1;
//! assert_eq!(extract_block(&text, open).map(str::trim), Some("tier = 1"));
//! ```

use std::path::Path;

use crate::constants::UTF8_BOM;
use crate::core::TechTreeError;

/// Comment marker of the script language.
pub const COMMENT_MARKER: char = '#';

/// Remove line comments from script text.
///
/// A line whose first non-whitespace character is `#` is dropped entirely.
/// On any other line everything from the first `#` to the end of the line is
/// discarded. Quoted strings are not protected, so a `#` inside quotes also
/// starts a comment.
pub fn strip_comments(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim_start().starts_with(COMMENT_MARKER) {
            continue;
        }
        match line.find(COMMENT_MARKER) {
            Some(pos) => kept.push(&line[..pos]),
            None => kept.push(line),
        }
    }
    kept.join("\n")
}

/// Extract the body of a brace-delimited block.
///
/// `start` must be the byte offset immediately after an opening `{`. The
/// scan tracks nesting depth starting at 1 and returns the text strictly
/// between the opening brace and its matching `}`. Returns `None` when the
/// text ends before the block closes.
pub fn extract_block(text: &str, start: usize) -> Option<&str> {
    let tail = text.get(start..)?;
    let mut depth: usize = 1;
    for (offset, byte) in tail.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&tail[..offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decode raw file bytes into text.
///
/// A leading UTF-8 byte order mark is removed and invalid byte sequences are
/// dropped rather than failing the whole file.
pub fn decode_source(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut text = String::with_capacity(body.len());
    for chunk in body.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Read and decode a source file.
///
/// # Errors
///
/// Returns [`TechTreeError::UnreadableSource`] when the file cannot be read.
/// Callers treat that as a file contributing nothing.
pub async fn read_source(path: &Path) -> Result<String, TechTreeError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| TechTreeError::UnreadableSource {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(decode_source(&bytes))
}
