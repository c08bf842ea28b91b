//! Per-language description dictionaries loaded from a dictionary root file

use std::path::Path;

use indexmap::IndexMap;

use super::parser::{LanguageDictionary, parse_descriptions};
use super::resolver::DescriptionResolver;
use super::{DICTIONARY_SECTION, normalize_language_tag};
use crate::error::{Error, Result};

/// Loaded description dictionaries, keyed by normalized language tag
#[derive(Debug, Clone, Default)]
pub struct DescriptionStore {
    languages: IndexMap<String, LanguageDictionary>,
}

impl DescriptionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every language listed by a dictionary root file
    ///
    /// Relative file paths resolve against the root file's directory. A
    /// language file that cannot be read is logged and skipped. On success the
    /// previously loaded languages are replaced; on failure they are kept.
    ///
    /// # Errors
    /// - [`Error::DictionaryNotFound`] if `path` does not exist
    /// - [`Error::NoLanguagesListed`] if the root has no `[Description]` entries
    /// - [`Error::NoLanguagesLoaded`] if every listed language failed
    ///
    /// # Returns
    /// The number of languages loaded.
    pub fn load_from_dictionary<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::DictionaryNotFound {
                path: path.to_path_buf(),
            });
        }

        let root = parse_descriptions(&std::fs::read_to_string(path)?);
        let listed = root
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(DICTIONARY_SECTION))
            .map(|(_, section)| &section.properties)
            .filter(|entries| !entries.is_empty())
            .ok_or_else(|| Error::NoLanguagesListed {
                path: path.to_path_buf(),
            })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut loaded = IndexMap::new();

        for (tag, file) in listed {
            let file_path = base_dir.join(file.trim());
            match std::fs::read_to_string(&file_path) {
                Ok(text) => {
                    let dictionary = parse_descriptions(&text);
                    tracing::debug!(
                        "Loaded {} description sections for {} from {}",
                        dictionary.len(),
                        tag,
                        file_path.display()
                    );
                    loaded.insert(normalize_language_tag(tag), dictionary);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load {} descriptions from {}: {}",
                        tag,
                        file_path.display(),
                        e
                    );
                }
            }
        }

        if loaded.is_empty() {
            return Err(Error::NoLanguagesLoaded {
                attempted: listed.len(),
            });
        }

        tracing::info!(
            "Loaded {} of {} description languages from {}",
            loaded.len(),
            listed.len(),
            path.display()
        );
        self.languages = loaded;
        Ok(self.languages.len())
    }

    /// Parse `text` as the dictionary for `tag`, replacing any previous one
    pub fn load_language(&mut self, tag: &str, text: &str) {
        self.languages
            .insert(normalize_language_tag(tag), parse_descriptions(text));
    }

    pub fn clear(&mut self) {
        self.languages.clear();
    }

    /// Loaded language tags, normalized
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Dictionary for `tag`; the tag is normalized first
    #[must_use]
    pub fn dictionary(&self, tag: &str) -> Option<&LanguageDictionary> {
        self.languages.get(&normalize_language_tag(tag))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Resolver answering lookups in `language`
    #[must_use]
    pub fn resolver(&self, language: &str) -> DescriptionResolver<'_> {
        DescriptionResolver::new(self, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_from_dictionary_skips_broken_language() {
        let dir = tempfile::tempdir().unwrap();
        let lang = dir.path().join("lang");
        std::fs::create_dir(&lang).unwrap();
        std::fs::write(lang.join("en.ini"), "[Unit]\nSpeed=How fast\n").unwrap();
        std::fs::write(lang.join("de.ini"), "[Unit]\nSpeed=Wie schnell\n").unwrap();
        std::fs::write(
            dir.path().join("dictionary.ini"),
            "[Description]\nen_us=lang/en.ini\nDE-de=lang/de.ini\nfr-FR=lang/missing.ini\n",
        )
        .unwrap();

        let mut store = DescriptionStore::new();
        let loaded = store.load_from_dictionary(dir.path().join("dictionary.ini")).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.languages().collect::<Vec<_>>(), vec!["en-US", "de-DE"]);
        assert!(store.dictionary("de_DE").is_some());
        assert!(store.dictionary("fr-FR").is_none());
    }

    #[test]
    fn test_load_from_dictionary_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.ini"), "\u{feff}[Unit]\r\nSpeed=How fast\r\n").unwrap();
        std::fs::write(
            dir.path().join("dictionary.ini"),
            "\u{feff}[Description]\r\nen-US=en.ini\r\n",
        )
        .unwrap();

        let mut store = DescriptionStore::new();
        let loaded = store.load_from_dictionary(dir.path().join("dictionary.ini")).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(store.resolver("en-US").get_description("Unit", "Speed"), Some("How fast"));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DescriptionStore::new();
        store.load_language("en-US", "[Kept]\nK=v\n");

        assert!(matches!(
            store.load_from_dictionary(dir.path().join("none.ini")),
            Err(Error::DictionaryNotFound { .. })
        ));

        let empty = dir.path().join("empty.ini");
        std::fs::write(&empty, "[Other]\nen-US=x.ini\n").unwrap();
        assert!(matches!(
            store.load_from_dictionary(&empty),
            Err(Error::NoLanguagesListed { .. })
        ));

        let broken = dir.path().join("broken.ini");
        std::fs::write(&broken, "[Description]\nen-US=gone.ini\nde-DE=gone2.ini\n").unwrap();
        assert!(matches!(
            store.load_from_dictionary(&broken),
            Err(Error::NoLanguagesLoaded { attempted: 2 })
        ));

        // Failed loads leave earlier languages alone
        assert!(store.dictionary("en-us").unwrap().contains_key("Kept"));
    }

    #[test]
    fn test_load_language_and_clear() {
        let mut store = DescriptionStore::new();
        store.load_language("zh_cn", "[A]\nK=v\n");
        store.load_language("ZH-CN", "[B]\nK=w\n");

        assert_eq!(store.languages().collect::<Vec<_>>(), vec!["zh-CN"]);
        assert!(store.dictionary("zh-CN").unwrap().contains_key("B"));

        store.clear();
        assert!(store.is_empty());
    }
}
