//! Access-log file loading.

use std::borrow::Cow;
use std::path::Path;

use forensics_core::{ForensicsError, Result};
use tracing::{debug, warn};

/// Read `path` and split it into lines.
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD` rather than rejected,
/// so a single corrupt line never aborts the run.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|source| ForensicsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decode_lines(&bytes, path))
}

/// Decode raw bytes into lines, replacing invalid UTF-8.
fn decode_lines(bytes: &[u8], origin: &Path) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(
            "Replaced invalid UTF-8 sequences while reading {}",
            origin.display()
        );
    }

    let lines: Vec<String> = split_lines(&text).into_iter().map(str::to_string).collect();
    debug!("Read {} lines from {}", lines.len(), origin.display());
    lines
}

/// `true` for every character that ends a line: `\n`, `\r`, vertical tab,
/// form feed, the ASCII file/group/record separators, NEL and the Unicode
/// line and paragraph separators.
fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split `text` at every line boundary, treating `\r\n` as one break.
///
/// A trailing break does not produce a final empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_boundary(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────
