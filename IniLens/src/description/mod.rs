//! Key documentation with section inheritance and language fallback
//!
//! A dictionary root file lists one description file per language:
//!
//! ```text
//! [Description]
//! en-US=descriptions/en.ini
//! zh_cn=descriptions/zh.ini
//! ```
//!
//! Lookups walk from the requested section through its `[Child]:[Base]`
//! chain in the selected language, then repeat the walk in [`FALLBACK_LANGUAGE`].

mod parser;
mod resolver;
mod store;

pub use parser::{DescriptionSection, LanguageDictionary, parse_descriptions};
pub use resolver::DescriptionResolver;
pub use store::DescriptionStore;

/// Language consulted when the selected one has no description
pub const FALLBACK_LANGUAGE: &str = "en-US";

/// Section of the dictionary root file that maps language tags to files
pub const DICTIONARY_SECTION: &str = "Description";

/// Normalize a language tag: language lower-case, region upper-case
///
/// `_` separators become `-`. Four-letter script subtags are title-cased.
///
/// ```
/// use inilens::description::normalize_language_tag;
///
/// assert_eq!(normalize_language_tag("zh_cn"), "zh-CN");
/// assert_eq!(normalize_language_tag("EN-us"), "en-US");
/// assert_eq!(normalize_language_tag("zh-hant-tw"), "zh-Hant-TW");
/// ```
#[must_use]
pub fn normalize_language_tag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .enumerate()
        .map(|(i, part)| match (i, part.len()) {
            (0, _) => part.to_ascii_lowercase(),
            (_, 2) => part.to_ascii_uppercase(),
            (_, 4) => {
                let lower = part.to_ascii_lowercase();
                let mut chars = lower.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            }
            _ => part.to_ascii_lowercase(),
        })
        .collect::<Vec<_>>()
        .join("-")
}
