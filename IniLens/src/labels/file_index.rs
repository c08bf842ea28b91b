//! Label table of a single file

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::formats::{CsfLanguage, LabelEntry, normalize_label};

/// Labels defined by one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabelIndex {
    path: PathBuf,
    /// Header language; `None` for text tables
    language: Option<CsfLanguage>,
    /// Normalized label -> entry, in first-definition order
    entries: IndexMap<String, LabelEntry>,
}

impl FileLabelIndex {
    /// Build from decoded entries; a label defined twice keeps its last value
    pub fn from_entries(
        path: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = LabelEntry>,
        language: Option<CsfLanguage>,
    ) -> Self {
        let mut map = IndexMap::new();
        for entry in entries {
            map.insert(entry.key(), entry);
        }
        Self {
            path: path.into(),
            language,
            entries: map,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn language(&self) -> Option<CsfLanguage> {
        self.language
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&LabelEntry> {
        self.entries.get(&normalize_label(label))
    }

    /// Normalized label keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries.values()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &LabelEntry)> {
        self.entries.iter()
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_last_definition_wins() {
        let file = FileLabelIndex::from_entries(
            "a.csf",
            vec![
                LabelEntry::new("Name:Tank", "Panzer"),
                LabelEntry::new("GUI:Ok", "Ok"),
                LabelEntry::new("NAME:TANK", "Kampfpanzer"),
            ],
            Some(CsfLanguage::German),
        );

        assert_eq!(file.len(), 2);
        assert_eq!(file.get("name:tank").unwrap().value, "Kampfpanzer");
        assert_eq!(file.get("name:tank").unwrap().label, "NAME:TANK");
        assert_eq!(file.keys().collect::<Vec<_>>(), vec!["name:tank", "gui:ok"]);
        assert_eq!(file.language(), Some(CsfLanguage::German));
    }
}
