//! Human-readable string tables
//!
//! ```text
//! # comment
//! GUI:Ok: Okay
//! TXT_Briefing: >
//!   First line of the briefing
//!   Second line
//! ```
//!
//! A value starting with `>` opens a block; each following line indented by
//! two spaces adds one line to it. The first line without that indent closes
//! the block. Blank lines are skipped everywhere, including inside blocks.

use std::path::Path;

use super::common::{LabelEntry, strip_bom};
use crate::error::Result;

/// Indent that continues a block value
const BLOCK_INDENT: &str = "  ";

/// Read a text string table from disk
///
/// # Errors
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read.
pub fn read_label_text<P: AsRef<Path>>(path: P) -> Result<Vec<LabelEntry>> {
    let text = std::fs::read_to_string(path)?;
    Ok(decode_label_text(&text))
}

/// Decode a text string table
///
/// Lines that are neither comments, blank, block continuations nor
/// `Label: value` pairs are ignored. A leading byte-order mark is skipped.
#[must_use]
pub fn decode_label_text(text: &str) -> Vec<LabelEntry> {
    let text = strip_bom(text);
    let mut entries = Vec::new();
    let mut block: Option<(String, Vec<String>)> = None;

    for raw in text.lines() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }

        if let Some((_, lines)) = block.as_mut() {
            if let Some(rest) = line.strip_prefix(BLOCK_INDENT) {
                lines.push(rest.to_string());
                continue;
            }
        }
        if let Some((label, lines)) = block.take() {
            entries.push(LabelEntry::new(label, lines.join("\n")));
        }

        let code = match line.find('#') {
            Some(0) => continue,
            Some(hash) if line[..hash].trim().is_empty() => continue,
            Some(hash) => &line[..hash],
            None => line,
        };

        let Some((label, value)) = split_label(code) else {
            continue;
        };
        let label = label.trim();
        if label.is_empty() {
            continue;
        }

        let value = value.trim();
        if value.starts_with('>') {
            block = Some((label.to_string(), Vec::new()));
        } else {
            entries.push(LabelEntry::new(label, value));
        }
    }

    if let Some((label, lines)) = block {
        entries.push(LabelEntry::new(label, lines.join("\n")));
    }

    entries
}

/// Split at the first `:` followed by whitespace or end of line
///
/// Labels themselves often contain colons (`GUI:Ok`).
fn split_label(code: &str) -> Option<(&str, &str)> {
    code.match_indices(':').find_map(|(at, _)| {
        let rest = &code[at + 1..];
        (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some((&code[..at], rest))
    })
}
