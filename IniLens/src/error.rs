//! Error types for `IniLens`
//!
//! Malformed archive or dialect input is never an error: decoders stop at the
//! first structural mismatch and hand back what they decoded. The variants
//! below cover I/O and configuration failures only.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `IniLens` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Description Dictionary Errors ====================
    /// The dictionary root file does not exist.
    #[error("description dictionary not found: {path}")]
    DictionaryNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The dictionary root file has no usable `[Description]` entries.
    #[error("no [Description] languages listed in {path}")]
    NoLanguagesListed {
        /// The dictionary root file.
        path: PathBuf,
    },

    /// Every language listed by the dictionary root failed to load.
    #[error("none of the {attempted} description languages could be loaded")]
    NoLanguagesLoaded {
        /// Number of languages that were attempted.
        attempted: usize,
    },

    // ==================== Label Index Errors ====================
    /// The requested file has never been indexed.
    #[error("label file not indexed: {path}")]
    LabelFileNotIndexed {
        /// The file that was requested.
        path: PathBuf,
    },

    /// A thread panicked while holding the label index lock.
    #[error("label index lock poisoned")]
    Poisoned,
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Error::Poisoned
    }
}

/// A specialized Result type for `IniLens` operations.
pub type Result<T> = std::result::Result<T, Error>;
