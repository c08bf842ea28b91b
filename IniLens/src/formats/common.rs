//! Common types shared across all label formats

use serde::{Deserialize, Serialize};

/// A single label from a string table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// Label name, case preserved (e.g. "GUI:Ok")
    pub label: String,
    /// Display text
    pub value: String,
    /// Extra ASCII payload carried by wide records (usually a sound name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_value: Option<String>,
}

impl LabelEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            extra_value: None,
        }
    }

    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra_value = Some(extra.into());
        self
    }

    /// Case-insensitive identity used by every label index
    #[must_use]
    pub fn key(&self) -> String {
        normalize_label(&self.label)
    }
}

/// Lower-case a label for lookups
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}

/// Drop a leading UTF-8 byte-order mark
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
