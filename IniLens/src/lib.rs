//! # `IniLens`
//!
//! Editor tooling for an INI modding dialect and its string tables.
//!
//! ## Components
//!
//! - **Dialect** - Incremental tokenizer with `[Child]:[Base]` sections and
//!   `"""` multi-line values, plus `[#include]` discovery
//! - **CSF** - Packed binary string tables (read and write)
//! - **Text labels** - `Label: value` string tables with block values
//! - **Labels** - Merged, case-insensitive label index over many files
//! - **Descriptions** - Per-language key documentation with inheritance
//!
//! ## Quick Start
//!
//! ### Tokenizing a Document
//!
//! ```
//! use inilens::dialect::{tokenize_range, LineDocument, NeverCancel};
//!
//! let doc = LineDocument::from_text("[General]\nName=\"\"\"\nDemo\n\"\"\"");
//! let tokens = tokenize_range(&doc, 2, 2, &NeverCancel);
//! assert_eq!(tokens.len(), 1);
//! ```
//!
//! ### Looking Up Labels
//!
//! ```no_run
//! use inilens::labels::{find_label_files, FsLabelSource, SharedLabelIndex};
//!
//! let index = SharedLabelIndex::new(FsLabelSource);
//! index.index_files(&find_label_files("mods/demo", &["csf", "llf"]))?;
//!
//! if let Some(entry) = index.lookup("GUI:Ok")? {
//!     println!("{}", entry.value);
//! }
//! # Ok::<(), inilens::Error>(())
//! ```
//!
//! ### Resolving Descriptions
//!
//! ```no_run
//! use inilens::description::DescriptionStore;
//!
//! let mut store = DescriptionStore::new();
//! store.load_from_dictionary("docs/dictionary.ini")?;
//!
//! let resolver = store.resolver("de-DE");
//! let text = resolver.get_description("E1", "Strength");
//! # Ok::<(), inilens::Error>(())
//! ```

pub mod error;
pub mod dialect;
pub mod formats;
pub mod labels;
pub mod description;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::dialect::{
        Cancellation, LineDocument, NeverCancel, ParseState, TextDocument, Token, TokenKind,
        collect_include_closure, parse_includes, tokenize_full, tokenize_range,
    };

    pub use crate::formats::{
        CsfLanguage, CsfTable, LabelEntry, decode_csf, decode_label_text, read_csf,
        read_label_text, write_csf,
    };

    pub use crate::labels::{
        FileLabelIndex, FsLabelSource, LabelFileKind, LabelIndex, LabelSource, SharedLabelIndex,
        find_label_files,
    };

    pub use crate::description::{
        DescriptionResolver, DescriptionSection, DescriptionStore, normalize_language_tag,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
