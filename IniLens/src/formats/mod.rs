//! File format handlers for modding string tables
//!
//! - [`csf`] - packed binary string tables (` FSC` archives)
//! - [`label_text`] - human-readable `Label: value` string tables

pub mod common;
pub mod csf;
pub mod label_text;

// Re-export common types for convenience
pub use common::{LabelEntry, normalize_label, strip_bom};

pub use csf::{CsfLanguage, CsfTable, decode_csf, encode_csf, read_csf, write_csf};
pub use label_text::{decode_label_text, read_label_text};
