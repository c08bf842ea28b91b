//! Label file sources and per-file decoding

use std::path::Path;

use super::LabelFileKind;
use super::file_index::FileLabelIndex;
use crate::error::Result;
use crate::formats::{decode_csf, decode_label_text};

/// Where label file bytes come from
pub trait LabelSource: Send + Sync {
    /// Read the whole file at `path`
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads label files from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLabelSource;

impl LabelSource for FsLabelSource {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Read and decode one label file
///
/// # Errors
/// Returns [`Error::Io`](crate::Error::Io) if the source cannot read the file.
/// Malformed contents decode to whatever labels precede the damage.
pub fn decode_label_file<S: LabelSource + ?Sized>(
    source: &S,
    path: &Path,
) -> Result<FileLabelIndex> {
    let bytes = source.read(path)?;

    let file = match LabelFileKind::from_path(path) {
        LabelFileKind::Binary => {
            let table = decode_csf(&bytes);
            FileLabelIndex::from_entries(path, table.entries, Some(table.language))
        }
        LabelFileKind::Text => {
            let text = String::from_utf8_lossy(&bytes);
            FileLabelIndex::from_entries(path, decode_label_text(&text), None)
        }
    };

    tracing::debug!("Decoded {} labels from {}", file.len(), path.display());
    Ok(file)
}
