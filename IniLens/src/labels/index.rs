//! Merged label index over many files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use super::file_index::FileLabelIndex;
use crate::formats::{LabelEntry, normalize_label};

/// Per-file label tables plus their merged view
///
/// Not synchronized; wrap it in [`SharedLabelIndex`](super::SharedLabelIndex)
/// to share it between threads.
#[derive(Debug, Default, Clone)]
pub struct LabelIndex {
    /// Loaded files, least recently loaded first
    files: IndexMap<PathBuf, FileLabelIndex>,
    /// Normalized label -> winning entry
    merged: HashMap<String, LabelEntry>,
}

/// Index size summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelIndexStats {
    pub files: usize,
    pub labels: usize,
}

impl LabelIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by loading `files` in order
    pub fn from_files(files: impl IntoIterator<Item = FileLabelIndex>) -> Self {
        let mut index = Self::new();
        for file in files {
            index.upsert_file(file);
        }
        index
    }

    /// Add a file, or replace it and make it the most recently loaded
    pub fn upsert_file(&mut self, file: FileLabelIndex) {
        let stale = self.files.shift_remove(file.path()).is_some();
        let path = file.path().to_path_buf();
        self.files.insert(path, file);

        if stale {
            // Labels the old version defined may now belong to an earlier file.
            self.rebuild_merged();
        } else if let Some(file) = self.files.last().map(|(_, f)| f) {
            for (key, entry) in file.iter() {
                self.merged.insert(key.clone(), entry.clone());
            }
        }
    }

    /// Drop a file and recompute the merged view from the files still loaded
    pub fn remove_file(&mut self, path: &Path) -> Option<FileLabelIndex> {
        let removed = self.files.shift_remove(path)?;
        self.rebuild_merged();
        Some(removed)
    }

    /// Winning entry for `label`, ignoring case
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<&LabelEntry> {
        self.merged.get(&normalize_label(label))
    }

    /// The file's own table, regardless of which labels it wins
    #[must_use]
    pub fn file(&self, path: &Path) -> Option<&FileLabelIndex> {
        self.files.get(path)
    }

    /// Normalized labels defined by `path`
    #[must_use]
    pub fn labels_in_file(&self, path: &Path) -> Option<Vec<&str>> {
        self.files.get(path).map(|file| file.keys().collect())
    }

    /// Loaded files, least recently loaded first
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    #[must_use]
    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Distinct labels in the merged view
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.merged.len()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn stats(&self) -> LabelIndexStats {
        LabelIndexStats {
            files: self.file_count(),
            labels: self.entry_count(),
        }
    }

    /// Merged entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = &LabelEntry> {
        self.merged.values()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.merged.clear();
    }

    fn rebuild_merged(&mut self) {
        self.merged.clear();
        for file in self.files.values() {
            for (key, entry) in file.iter() {
                self.merged.insert(key.clone(), entry.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(path: &str, pairs: &[(&str, &str)]) -> FileLabelIndex {
        FileLabelIndex::from_entries(
            path,
            pairs.iter().map(|(l, v)| LabelEntry::new(*l, *v)),
            None,
        )
    }

    #[test]
    fn test_later_file_wins_and_lookup_ignores_case() {
        let index = LabelIndex::from_files([
            file("base.csf", &[("GUI:Ok", "Ok"), ("Name:Tank", "Tank")]),
            file("mod.llf", &[("gui:ok", "Okay")]),
        ]);

        assert_eq!(index.lookup("GUI:OK").unwrap().value, "Okay");
        assert_eq!(index.lookup("name:tank").unwrap().value, "Tank");
        assert!(index.lookup("missing").is_none());
        assert_eq!(index.stats(), LabelIndexStats { files: 2, labels: 2 });
    }

    #[test]
    fn test_reload_moves_file_to_end() {
        let mut index = LabelIndex::from_files([
            file("a", &[("X", "from a")]),
            file("b", &[("X", "from b")]),
        ]);
        assert_eq!(index.lookup("x").unwrap().value, "from b");

        index.upsert_file(file("a", &[("X", "a again")]));
        assert_eq!(index.lookup("x").unwrap().value, "a again");
        assert_eq!(index.files().collect::<Vec<_>>(), vec![Path::new("b"), Path::new("a")]);
    }

    #[test]
    fn test_reload_dropping_label_falls_back() {
        let mut index = LabelIndex::from_files([
            file("a", &[("Shared", "a"), ("OnlyA", "1")]),
            file("b", &[("Shared", "b")]),
        ]);

        index.upsert_file(file("b", &[("Other", "2")]));
        assert_eq!(index.lookup("shared").unwrap().value, "a");
        assert_eq!(index.entry_count(), 3);
    }

    #[test]
    fn test_remove_file() {
        let mut index = LabelIndex::from_files([
            file("a", &[("Shared", "a")]),
            file("b", &[("Shared", "b"), ("OnlyB", "1")]),
        ]);

        assert!(index.remove_file(Path::new("b")).is_some());
        assert!(index.remove_file(Path::new("b")).is_none());
        assert_eq!(index.lookup("shared").unwrap().value, "a");
        assert!(index.lookup("onlyb").is_none());
        assert_eq!(index.labels_in_file(Path::new("a")), Some(vec!["shared"]));
        assert_eq!(index.labels_in_file(Path::new("b")), None);
    }
}
