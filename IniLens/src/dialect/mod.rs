//! INI modding dialect support
//!
//! The dialect is a plain INI variant with three extensions:
//!
//! - **Section inheritance** - `[Child]:[Base]` declares that `Child` falls back
//!   to `Base` for keys it does not define
//! - **Dotted keys** - `Weapon.Primary.Range=5`
//! - **Triple-quoted values** - `Text="""` opens a value that may span any
//!   number of lines until the next `"""`
//!
//! `;` starts a line comment everywhere except inside a triple-quoted value.
//!
//! # Tokenizing
//!
//! ```
//! use inilens::dialect::{tokenize_full, LineDocument, NeverCancel, TokenKind};
//!
//! let doc = LineDocument::from_text("[Unit]:[Base]\nSpeed=4 ; fast");
//! let tokens = tokenize_full(&doc, &NeverCancel);
//! assert_eq!(tokens[0].kind, TokenKind::SectionBracket);
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Comment));
//! ```

mod classifier;
mod includes;
mod section;
mod tokenizer;

pub use classifier::{ClassifiedLine, classify_line, next_state};
pub use includes::{INCLUDE_SECTION, collect_include_closure, parse_includes};
pub use section::{SectionHeader, parse_section_header};
pub use tokenizer::{state_at, tokenize_full, tokenize_range};

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Marker that opens and closes a multi-line value
pub const TRIPLE_QUOTE: &str = "\"\"\"";

/// Syntax category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Comment,
    SectionBracket,
    SectionContent,
    SectionInherit,
    /// Dotted key part; depth 3 absorbs every part after the second
    KeyPart(u8),
    Operator,
    Value,
    ValueComma,
    ValueString,
    ValueMultilineString,
}

impl TokenKind {
    /// Every kind in legend order
    pub const LEGEND: [TokenKind; 12] = [
        TokenKind::Comment,
        TokenKind::SectionBracket,
        TokenKind::SectionContent,
        TokenKind::SectionInherit,
        TokenKind::KeyPart(1),
        TokenKind::KeyPart(2),
        TokenKind::KeyPart(3),
        TokenKind::Operator,
        TokenKind::Value,
        TokenKind::ValueComma,
        TokenKind::ValueString,
        TokenKind::ValueMultilineString,
    ];

    /// Key part kind for a zero-based part index
    #[must_use]
    pub fn key_part(index: usize) -> Self {
        TokenKind::KeyPart((index + 1).min(3) as u8)
    }

    /// Name used in semantic token legends
    #[must_use]
    pub fn legend_name(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::SectionBracket => "sectionBracket",
            Self::SectionContent => "sectionContent",
            Self::SectionInherit => "sectionInherit",
            Self::KeyPart(1) => "keyPart1",
            Self::KeyPart(2) => "keyPart2",
            Self::KeyPart(_) => "keyPart3",
            Self::Operator => "operator",
            Self::Value => "value",
            Self::ValueComma => "valueComma",
            Self::ValueString => "valueString",
            Self::ValueMultilineString => "valueMultilineString",
        }
    }

    /// Index of this kind in [`TokenKind::LEGEND`]
    #[must_use]
    pub fn legend_index(self) -> usize {
        match self {
            Self::Comment => 0,
            Self::SectionBracket => 1,
            Self::SectionContent => 2,
            Self::SectionInherit => 3,
            Self::KeyPart(1) => 4,
            Self::KeyPart(2) => 5,
            Self::KeyPart(_) => 6,
            Self::Operator => 7,
            Self::Value => 8,
            Self::ValueComma => 9,
            Self::ValueString => 10,
            Self::ValueMultilineString => 11,
        }
    }
}

/// A classified span of one line
///
/// Columns and lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub line: usize,
    pub start_column: usize,
    pub length: usize,
    pub kind: TokenKind,
}

impl Token {
    #[must_use]
    pub fn new(line: usize, start_column: usize, length: usize, kind: TokenKind) -> Self {
        Self {
            line,
            start_column,
            length,
            kind,
        }
    }

    /// Column one past the last character of the token
    #[must_use]
    pub fn end_column(&self) -> usize {
        self.start_column + self.length
    }
}

/// Parser state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseState {
    pub in_multiline_string: bool,
}

impl ParseState {
    /// State at the top of every document
    pub const INITIAL: ParseState = ParseState {
        in_multiline_string: false,
    };

    #[must_use]
    pub fn multiline(in_multiline_string: bool) -> Self {
        Self {
            in_multiline_string,
        }
    }
}

/// Line-addressable text supplied by the editor
pub trait TextDocument {
    fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator
    fn line(&self, index: usize) -> &str;
}

/// Owned document split into lines
#[derive(Debug, Clone, Default)]
pub struct LineDocument {
    lines: Vec<String>,
}

impl LineDocument {
    /// Split text on `\n`, dropping a trailing `\r` from each line
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl TextDocument for LineDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", String::as_str)
    }
}

impl TextDocument for [&str] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> &str {
        self.get(index).copied().unwrap_or("")
    }
}

/// Cooperative cancellation, polled once per line
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// Cancellation that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}
