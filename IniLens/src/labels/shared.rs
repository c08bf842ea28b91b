//! Thread-safe wrapper around the merged label index

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use rayon::prelude::*;

use super::file_index::FileLabelIndex;
use super::index::{LabelIndex, LabelIndexStats};
use super::source::{LabelSource, decode_label_file};
use crate::error::{Error, Result};
use crate::formats::LabelEntry;

/// Thread-safe label index with a single writer
///
/// Decoding runs outside the lock; every change to the merged view happens
/// under the write lock. Clones share the same index.
#[derive(Clone)]
pub struct SharedLabelIndex {
    inner: Arc<RwLock<LabelIndex>>,
    source: Arc<dyn LabelSource>,
}

impl std::fmt::Debug for SharedLabelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLabelIndex")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl SharedLabelIndex {
    pub fn new<S: LabelSource + 'static>(source: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LabelIndex::new())),
            source: Arc::new(source),
        }
    }

    /// Decode `paths` in parallel, then load them in the given order
    ///
    /// Files that cannot be read are logged and skipped.
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] if the index lock is poisoned.
    ///
    /// # Returns
    /// The number of files loaded.
    pub fn index_files(&self, paths: &[PathBuf]) -> Result<usize> {
        let start = std::time::Instant::now();

        let decoded: Vec<Result<FileLabelIndex>> = paths
            .par_iter()
            .map(|path| decode_label_file(self.source.as_ref(), path))
            .collect();

        // Merge results sequentially
        let mut index = self.inner.write()?;
        let mut loaded = 0;
        for (path, result) in paths.iter().zip(decoded) {
            match result {
                Ok(file) => {
                    index.upsert_file(file);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to index {}: {}", path.display(), e);
                }
            }
        }

        tracing::info!(
            "Indexed {} labels from {} files in {:.2}s",
            index.entry_count(),
            loaded,
            start.elapsed().as_secs_f64()
        );
        Ok(loaded)
    }

    /// Re-decode one file and make it the most recently loaded
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read; the index is left
    /// untouched in that case.
    pub fn reload_file(&self, path: &Path) -> Result<()> {
        let file = decode_label_file(self.source.as_ref(), path)?;
        self.inner.write()?.upsert_file(file);
        Ok(())
    }

    /// Remove a file and rebuild the merged view from the remaining files
    ///
    /// The remaining files are decoded again from the source while the write
    /// lock is held; files that can no longer be read drop out of the index.
    ///
    /// # Errors
    /// Returns [`Error::LabelFileNotIndexed`] if `path` was never loaded.
    pub fn remove_file(&self, path: &Path) -> Result<()> {
        let mut index = self.inner.write()?;
        if !index.contains_file(path) {
            return Err(Error::LabelFileNotIndexed {
                path: path.to_path_buf(),
            });
        }

        let remaining: Vec<PathBuf> = index
            .files()
            .filter(|p| *p != path)
            .map(Path::to_path_buf)
            .collect();

        let decoded: Vec<Result<FileLabelIndex>> = remaining
            .par_iter()
            .map(|p| decode_label_file(self.source.as_ref(), p))
            .collect();

        let files = remaining
            .iter()
            .zip(decoded)
            .filter_map(|(p, result)| match result {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!("Dropping {} from label index: {}", p.display(), e);
                    None
                }
            });

        *index = LabelIndex::from_files(files);
        tracing::debug!(
            "Removed {}; {} files remain",
            path.display(),
            index.file_count()
        );
        Ok(())
    }

    /// Winning entry for `label`, ignoring case
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] if the index lock is poisoned.
    pub fn lookup(&self, label: &str) -> Result<Option<LabelEntry>> {
        Ok(self.inner.read()?.lookup(label).cloned())
    }

    /// Normalized labels defined by `path`
    ///
    /// # Errors
    /// Returns [`Error::LabelFileNotIndexed`] if `path` was never loaded.
    pub fn labels_in_file(&self, path: &Path) -> Result<Vec<String>> {
        let index = self.inner.read()?;
        index
            .labels_in_file(path)
            .map(|labels| labels.into_iter().map(str::to_string).collect())
            .ok_or_else(|| Error::LabelFileNotIndexed {
                path: path.to_path_buf(),
            })
    }

    /// Loaded files, least recently loaded first
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] if the index lock is poisoned.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.inner.read()?.files().map(Path::to_path_buf).collect())
    }

    /// # Errors
    /// Returns [`Error::Poisoned`] if the index lock is poisoned.
    pub fn stats(&self) -> Result<LabelIndexStats> {
        Ok(self.inner.read()?.stats())
    }

    /// Read access for several queries under one lock
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] if the index lock is poisoned.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, LabelIndex>> {
        Ok(self.inner.read()?)
    }

    /// # Errors
    /// Returns [`Error::Poisoned`] if the index lock is poisoned.
    pub fn clear(&self) -> Result<()> {
        self.inner.write()?.clear();
        Ok(())
    }
}
