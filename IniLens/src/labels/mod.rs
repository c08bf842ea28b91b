//! Merged label index over string-table files
//!
//! Every loaded file keeps its own [`FileLabelIndex`]. The merged view is the
//! fold of those tables in load order, so a label defined in several files
//! resolves to the most recently loaded definition. Lookups ignore case.
//!
//! ## Usage
//!
//! ```ignore
//! let index = SharedLabelIndex::new(FsLabelSource);
//! let files = find_label_files("mods/demo", &["csf", "llf"]);
//! index.index_files(&files)?;
//!
//! let ok = index.lookup("gui:ok")?;
//! ```

mod file_index;
mod index;
mod shared;
mod source;

pub use file_index::FileLabelIndex;
pub use index::{LabelIndex, LabelIndexStats};
pub use shared::SharedLabelIndex;
pub use source::{FsLabelSource, LabelSource, decode_label_file};

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// Extensions indexed when none are configured
pub const DEFAULT_LABEL_EXTENSIONS: [&str; 2] = ["csf", "llf"];

/// Decoder used for a label file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LabelFileKind {
    /// Packed ` FSC` archive
    Binary,
    /// `Label: value` text table
    Text,
}

impl LabelFileKind {
    /// `.csf` files are binary, everything else is text
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csf") => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Find all label files under `dir` with one of `extensions`
///
/// Extensions compare case-insensitively and are given without the dot.
/// Unreadable directory entries are skipped. Returns a sorted list.
pub fn find_label_files<P, S>(dir: P, extensions: &[S]) -> Vec<PathBuf>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path().extension().is_some_and(|ext| {
                    extensions
                        .iter()
                        .any(|wanted| ext.eq_ignore_ascii_case(wanted.as_ref()))
                })
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(LabelFileKind::from_path(Path::new("ra2md.CSF")), LabelFileKind::Binary);
        assert_eq!(LabelFileKind::from_path(Path::new("a/b.csf")), LabelFileKind::Binary);
        assert_eq!(LabelFileKind::from_path(Path::new("mod.llf")), LabelFileKind::Text);
        assert_eq!(LabelFileKind::from_path(Path::new("noext")), LabelFileKind::Text);
    }

    #[test]
    fn test_find_label_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lang").join("de");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("b.csf"), b"").unwrap();
        std::fs::write(dir.path().join("a.LLF"), b"").unwrap();
        std::fs::write(dir.path().join("rules.ini"), b"").unwrap();
        std::fs::write(nested.join("c.csf"), b"").unwrap();

        let found = find_label_files(dir.path(), &DEFAULT_LABEL_EXTENSIONS);
        assert_eq!(
            found,
            vec![
                dir.path().join("a.LLF"),
                dir.path().join("b.csf"),
                nested.join("c.csf"),
            ]
        );
    }

    #[test]
    fn test_find_label_files_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = find_label_files(dir.path().join("absent"), &DEFAULT_LABEL_EXTENSIONS);
        assert!(found.is_empty());
    }
}
