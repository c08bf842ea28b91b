//! Packed binary string tables (` FSC` archives)
//!
//! Layout, all integers little-endian `i32`:
//!
//! ```text
//! " FSC" version labelCount stringCount reserved languageId
//! labelCount x:
//!     " LBL" pairCount labelLength label[ascii]
//!     pairCount x:
//!         " RTS" | "WRTS" valueLength value[u16 x valueLength, each XOR 0xFFFF]
//!         "WRTS" only: extraLength extra[ascii]
//! ```
//!
//! Decoding is fail-soft: the first structural mismatch ends decoding and the
//! labels read up to that point are kept.

mod reader;
mod writer;

pub use reader::{decode_csf, read_csf};
pub use writer::{encode_csf, write_csf};

use serde::Serialize;

use super::common::LabelEntry;

/// File header magic (note the leading space)
pub const FILE_MAGIC: [u8; 4] = *b" FSC";
/// Label record magic
pub const LABEL_MAGIC: [u8; 4] = *b" LBL";
/// Plain string record magic
pub const STRING_MAGIC: [u8; 4] = *b" RTS";
/// String record carrying an extra ASCII value
pub const WIDE_STRING_MAGIC: [u8; 4] = *b"WRTS";

/// Mask applied to every UTF-16 code unit of a value
pub const VALUE_XOR: u16 = 0xFFFF;

/// Version written by [`encode_csf`] when none is set
pub const DEFAULT_VERSION: i32 = 3;

/// Scramble or unscramble one code unit; applying it twice is the identity
#[must_use]
pub fn scramble_unit(unit: u16) -> u16 {
    unit ^ VALUE_XOR
}

/// Language stored in the archive header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CsfLanguage {
    #[default]
    EnglishUs,
    EnglishUk,
    German,
    French,
    Spanish,
    Italian,
    Japanese,
    Jabberwockie,
    Korean,
    Chinese,
    Unknown(i32),
}

impl CsfLanguage {
    #[must_use]
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => Self::EnglishUs,
            1 => Self::EnglishUk,
            2 => Self::German,
            3 => Self::French,
            4 => Self::Spanish,
            5 => Self::Italian,
            6 => Self::Japanese,
            7 => Self::Jabberwockie,
            8 => Self::Korean,
            9 => Self::Chinese,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn id(self) -> i32 {
        match self {
            Self::EnglishUs => 0,
            Self::EnglishUk => 1,
            Self::German => 2,
            Self::French => 3,
            Self::Spanish => 4,
            Self::Italian => 5,
            Self::Japanese => 6,
            Self::Jabberwockie => 7,
            Self::Korean => 8,
            Self::Chinese => 9,
            Self::Unknown(id) => id,
        }
    }

    /// Language tag (e.g. "en-US"); `"unknown"` for unlisted ids
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EnglishUs => "en-US",
            Self::EnglishUk => "en-GB",
            Self::German => "de-DE",
            Self::French => "fr-FR",
            Self::Spanish => "es-ES",
            Self::Italian => "it-IT",
            Self::Japanese => "ja-JP",
            Self::Jabberwockie => "jabberwockie",
            Self::Korean => "ko-KR",
            Self::Chinese => "zh-CN",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Inverse of [`code`](Self::code), ignoring case and `-`/`_` differences
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let wanted = code.trim().replace('_', "-");
        (0..=9)
            .map(Self::from_id)
            .find(|language| language.code().eq_ignore_ascii_case(&wanted))
    }
}

/// Decoded contents of one archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsfTable {
    pub version: i32,
    pub language: CsfLanguage,
    /// One entry per decoded string record, in file order
    pub entries: Vec<LabelEntry>,
}

impl Default for CsfTable {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            language: CsfLanguage::default(),
            entries: Vec::new(),
        }
    }
}

impl CsfTable {
    #[must_use]
    pub fn new(language: CsfLanguage, entries: Vec<LabelEntry>) -> Self {
        Self {
            version: DEFAULT_VERSION,
            language,
            entries,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
